use std::ops::BitOr;

// Horizontal OR of one batch of lane selections.

#[inline]
pub fn or_8<T: BitOr<T, Output=T> + Copy>(v: [T; 8]) -> T {
    or_4(or_8_to_4(v))
}

#[inline]
pub fn or_4<T: BitOr<T, Output=T> + Copy>(v: [T; 4]) -> T {
    or_2(or_4_to_2(v))
}

#[inline]
fn or_8_to_4<T: BitOr<T, Output=T> + Copy>(v: [T; 8]) -> [T; 4] {
    [
        v[0] | v[1],
        v[2] | v[3],
        v[4] | v[5],
        v[6] | v[7],
    ]
}

#[inline]
fn or_4_to_2<T: BitOr<T, Output=T> + Copy>(v: [T; 4]) -> [T; 2] {
    [v[0] | v[1], v[2] | v[3]]
}

#[inline]
fn or_2<T: BitOr<T, Output=T> + Copy>(v: [T; 2]) -> T {
    v[0] | v[1]
}

/// Lane offset of the lowest set bit in a merged selection, if any lane
/// was selected.
#[inline]
pub fn first_lane<T: num::PrimInt>(merged: T) -> Option<usize> {
    if merged.is_zero() {
        None
    } else {
        Some(merged.trailing_zeros() as usize)
    }
}
