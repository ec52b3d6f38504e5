use supset::{is_superset, ScanElement};

pub fn prop_leftmost_superset<T>(result: Option<usize>, set: &[T], query: T) -> bool
where
    T: ScanElement,
{
    match result {
        Some(i) =>
            i < set.len() &&
            is_superset(set[i], query) &&
            prop_no_superset(&set[..i], query),
        None => prop_no_superset(set, query),
    }
}

// No element of `set` contains every bit of `query`.
pub fn prop_no_superset<T>(set: &[T], query: T) -> bool
where
    T: ScanElement,
{
    set.iter().all(|&e| !is_superset(e, query))
}

// The sentinel contract agrees with the positional result.
pub fn prop_sentinel_consistent<T>(result: T, position: Option<usize>, set: &[T]) -> bool
where
    T: ScanElement,
{
    match position {
        Some(i) => result == set[i],
        None => result == T::SENTINEL,
    }
}
