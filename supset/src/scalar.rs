use num::PrimInt;

use crate::{
    scan::{is_superset, ScanElement, LANES},
    util::{first_lane, or_8},
};

/// Reference scan: plain left-to-right search, any length.
#[inline]
pub fn naive_position<T: PrimInt>(set: &[T], query: T) -> Option<usize> {
    set.iter().position(|&element| is_superset(element, query))
}

/// Batch kernel without vector registers. Each lane's comparison becomes an
/// all-ones or all-zeros mask, is narrowed to the lane tag and merged with
/// OR, exactly as the vector kernels do.
pub fn tagged_batch_scan<T: ScanElement>(batches: &[T], query: T) -> Option<usize> {
    debug_assert!(batches.len() % LANES == 0);

    for (b, batch) in batches.chunks_exact(LANES).enumerate() {
        let mut selected = [T::zero(); LANES];
        for lane in 0..LANES {
            let eq_mask = if is_superset(batch[lane], query) {
                T::max_value()
            } else {
                T::zero()
            };
            selected[lane] = eq_mask & T::LANE_TAGS[lane];
        }

        if let Some(lane) = first_lane(or_8(selected)) {
            return Some(b * LANES + lane);
        }
    }
    None
}
