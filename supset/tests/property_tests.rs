#[macro_use(quickcheck)]
extern crate quickcheck;
mod testlib;
use testlib::{
    ScanCase, TailCase, scanners,
    properties::{prop_leftmost_superset, prop_sentinel_consistent},
};
use supset::{
    scalar, ScanError, ScanElement,
    superset_position, find_superset_or_sentinel, checked_find_superset,
};

fn same_as_naive<T: ScanElement>(case: &ScanCase<T>) -> bool {
    let expected = scalar::naive_position(&case.set, case.query);

    scanners::<T>().iter().all(|scanner| {
        scanner.position(&case.set, case.query) == expected
    })
}

fn tail_match_found<T: ScanElement>(case: &TailCase<T>) -> bool {
    scanners::<T>().iter().all(|scanner| {
        scanner.position(&case.set, case.query) == Some(case.at)
    })
}

quickcheck! {
    fn same_as_naive_u32(case: ScanCase<u32>) -> bool {
        same_as_naive(&case)
    }

    fn same_as_naive_u16(case: ScanCase<u16>) -> bool {
        same_as_naive(&case)
    }

    fn leftmost_superset_u32(case: ScanCase<u32>) -> bool {
        let result = superset_position(&case.set, case.query);
        prop_leftmost_superset(result, &case.set, case.query)
    }

    fn leftmost_superset_u16(case: ScanCase<u16>) -> bool {
        let result = superset_position(&case.set, case.query);
        prop_leftmost_superset(result, &case.set, case.query)
    }

    fn tail_match_found_u32(case: TailCase<u32>) -> bool {
        tail_match_found(&case)
    }

    fn tail_match_found_u16(case: TailCase<u16>) -> bool {
        tail_match_found(&case)
    }

    fn sentinel_consistent_u32(case: ScanCase<u32>) -> bool {
        let position = superset_position(&case.set, case.query);
        scanners::<u32>().iter().all(|scanner| {
            let result = scanner.scan(&case.set, case.query);
            prop_sentinel_consistent(result, position, &case.set)
        })
    }

    fn sentinel_consistent_u16(case: ScanCase<u16>) -> bool {
        let position = superset_position(&case.set, case.query);
        scanners::<u16>().iter().all(|scanner| {
            let result = scanner.scan(&case.set, case.query);
            prop_sentinel_consistent(result, position, &case.set)
        })
    }

    fn idempotent_u32(case: ScanCase<u32>) -> bool {
        let first = find_superset_or_sentinel(&case.set, case.query);
        let second = find_superset_or_sentinel(&case.set, case.query);
        first == second
    }

    fn checked_prefix_u32(case: ScanCase<u32>, len: usize) -> bool {
        let len = len % (case.set.len() + 8);
        let result = checked_find_superset(&case.set, len, case.query);

        if len <= case.set.len() {
            result == Ok(find_superset_or_sentinel(&case.set[..len], case.query))
        } else {
            result == Err(ScanError::LengthOutOfBounds {
                len,
                available: case.set.len(),
            })
        }
    }
}
