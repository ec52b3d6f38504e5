// Batch kernels on std::simd, for targets without hand-written intrinsics.

use crate::scan::BatchScan;

pub fn u32x8() -> Option<BatchScan<u32>> {
    #[cfg(feature = "portable_simd")]
    { Some(kernels::batch_scan_u32x8) }
    #[cfg(not(feature = "portable_simd"))]
    { None }
}

pub fn u16x8() -> Option<BatchScan<u16>> {
    #[cfg(feature = "portable_simd")]
    { Some(kernels::batch_scan_u16x8) }
    #[cfg(not(feature = "portable_simd"))]
    { None }
}

#[cfg(feature = "portable_simd")]
mod kernels {
    use std::simd::{prelude::*, LaneCount, SimdElement, SupportedLaneCount};

    use crate::{
        scan::{ScanElement, LANES},
        util::first_lane,
    };

    #[inline]
    unsafe fn load_unsafe<T, const N: usize>(src: *const T) -> Simd<T, N>
    where
        T: SimdElement,
        LaneCount<N>: SupportedLaneCount,
    {
        unsafe { std::ptr::read_unaligned(src as *const Simd<T, N>) }
    }

    macro_rules! portable_batch_scan {
        ($name:ident, $t:ty, $v:ty) => {
            pub fn $name(batches: &[$t], query: $t) -> Option<usize> {
                debug_assert!(batches.len() % LANES == 0);

                let q = <$v>::splat(query);
                let tags = <$v>::from_array(<$t>::LANE_TAGS);
                let zero = <$v>::splat(0);

                for (b, batch) in batches.chunks_exact(LANES).enumerate() {
                    let v: $v = unsafe { load_unsafe(batch.as_ptr()) };
                    let eq = (v & q).simd_eq(q);
                    let merged = eq.select(tags, zero).reduce_or();

                    if let Some(lane) = first_lane(merged) {
                        return Some(b * LANES + lane);
                    }
                }
                None
            }
        };
    }

    portable_batch_scan!(batch_scan_u32x8, u32, u32x8);
    portable_batch_scan!(batch_scan_u16x8, u16, u16x8);
}
