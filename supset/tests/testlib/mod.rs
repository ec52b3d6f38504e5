#![allow(dead_code)]

pub mod properties;

use quickcheck::{Arbitrary, Gen};
use supset::{dispatch, ScanElement, SupersetScanner};

/// Lengths around batch boundaries.
const EDGE_LENGTHS: [usize; 14] = [0, 1, 7, 8, 9, 15, 16, 17, 23, 24, 25, 63, 64, 65];
const MAX_RANDOM_LENGTH: usize = 200;
const MAX_BATCHES: usize = 4;

/// One scanner per backend usable for `T` on this machine.
pub fn scanners<T: ScanElement>() -> Vec<SupersetScanner<T>> {
    dispatch::available::<T>()
        .into_iter()
        .filter_map(SupersetScanner::with_backend)
        .collect()
}

// Arbitrary Scan Input //
#[derive(Debug, Clone)]
pub struct ScanCase<T> {
    pub set: Vec<T>,
    pub query: T,
}

impl<T: ScanElement + Arbitrary> Arbitrary for ScanCase<T> {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = if bool::arbitrary(g) {
            *g.choose(&EDGE_LENGTHS).unwrap()
        } else {
            usize::arbitrary(g) % MAX_RANDOM_LENGTH
        };
        let set: Vec<T> = (0..len).map(|_| T::arbitrary(g)).collect();

        let query = match u8::arbitrary(g) % 3 {
            // Subset of some element, so at least one match exists.
            0 if !set.is_empty() => {
                let source = *g.choose(&set).unwrap();
                source & T::arbitrary(g)
            },
            1 => single_bit(g),
            _ => T::arbitrary(g),
        };

        ScanCase { set, query }
    }
}

// Arbitrary Input With The Only Match In The Tail //
#[derive(Debug, Clone)]
pub struct TailCase<T> {
    pub set: Vec<T>,
    pub query: T,
    pub at: usize,
}

impl<T: ScanElement + Arbitrary> Arbitrary for TailCase<T> {
    fn arbitrary(g: &mut Gen) -> Self {
        let batches = usize::arbitrary(g) % MAX_BATCHES;
        let tail = 1 + usize::arbitrary(g) % 7;
        let len = batches * 8 + tail;

        let query = nonzero(T::arbitrary(g));
        let mut set: Vec<T> = (0..len)
            .map(|_| missing_bit_of(T::arbitrary(g), query, g))
            .collect();

        let at = batches * 8 + usize::arbitrary(g) % tail;
        set[at] = T::arbitrary(g) | query;

        TailCase { set, query, at }
    }
}

pub fn nonzero<T: ScanElement>(value: T) -> T {
    if value.is_zero() { T::one() } else { value }
}

pub fn single_bit<T: ScanElement>(g: &mut Gen) -> T {
    T::one() << (usize::arbitrary(g) % T::BITS as usize)
}

/// Clears one of the bits of `query` from `element`, so it cannot match.
pub fn missing_bit_of<T: ScanElement>(element: T, query: T, g: &mut Gen) -> T {
    let bits: Vec<usize> = (0..T::BITS as usize)
        .filter(|&i| !((query >> i) & T::one()).is_zero())
        .collect();
    let bit = *g.choose(&bits).unwrap();
    element & !(T::one() << bit)
}
