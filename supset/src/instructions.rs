//! x86 batch kernels.
//!
//! Every kernel broadcasts the query, ANDs it into the loaded lanes and
//! compares the result against the query. The comparison mask is narrowed to
//! the per-lane tags and the tags are ORed into one scalar whose lowest set
//! bit is the leftmost matching lane.

use crate::scan::BatchScan;

pub fn avx2_u32() -> Option<BatchScan<u32>> {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    { Some(x86::batch_scan_avx2_u32) }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    { None }
}

pub fn sse2_u32() -> Option<BatchScan<u32>> {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    { Some(x86::batch_scan_sse2_u32) }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    { None }
}

pub fn sse2_u16() -> Option<BatchScan<u16>> {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    { Some(x86::batch_scan_sse2_u16) }
    #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
    { None }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod x86 {
    use std::arch::x86_64::*;

    use crate::{
        dispatch::{has_avx2, has_sse2},
        scalar,
        scan::{ScanElement, LANES},
        util::{first_lane, or_4, or_8},
    };

    pub fn batch_scan_avx2_u32(batches: &[u32], query: u32) -> Option<usize> {
        if has_avx2() {
            unsafe { avx2_u32(batches, query) }
        } else {
            scalar::tagged_batch_scan(batches, query)
        }
    }

    pub fn batch_scan_sse2_u32(batches: &[u32], query: u32) -> Option<usize> {
        if has_sse2() {
            unsafe { sse2_u32(batches, query) }
        } else {
            scalar::tagged_batch_scan(batches, query)
        }
    }

    pub fn batch_scan_sse2_u16(batches: &[u16], query: u16) -> Option<usize> {
        if has_sse2() {
            unsafe { sse2_u16(batches, query) }
        } else {
            scalar::tagged_batch_scan(batches, query)
        }
    }

    /// # Safety
    /// The CPU must support AVX2.
    #[target_feature(enable = "avx2")]
    unsafe fn avx2_u32(batches: &[u32], query: u32) -> Option<usize> {
        debug_assert!(batches.len() % LANES == 0);

        let q = _mm256_set1_epi32(query as i32);
        let tags = _mm256_loadu_si256(u32::LANE_TAGS.as_ptr() as *const __m256i);
        let mut selected = [0u32; LANES];

        for (b, batch) in batches.chunks_exact(LANES).enumerate() {
            let v = _mm256_loadu_si256(batch.as_ptr() as *const __m256i);
            let eq = _mm256_cmpeq_epi32(_mm256_and_si256(v, q), q);
            _mm256_storeu_si256(
                selected.as_mut_ptr() as *mut __m256i,
                _mm256_and_si256(eq, tags));

            if let Some(lane) = first_lane(or_8(selected)) {
                return Some(b * LANES + lane);
            }
        }
        None
    }

    /// One batch of u32 spans two 128-bit registers; their selections are
    /// disjoint so they are ORed before the horizontal merge.
    ///
    /// # Safety
    /// The CPU must support SSE2.
    #[target_feature(enable = "sse2")]
    unsafe fn sse2_u32(batches: &[u32], query: u32) -> Option<usize> {
        debug_assert!(batches.len() % LANES == 0);
        const HALF: usize = LANES / 2;

        let q = _mm_set1_epi32(query as i32);
        let tags_lo = _mm_loadu_si128(u32::LANE_TAGS.as_ptr() as *const __m128i);
        let tags_hi = _mm_loadu_si128(u32::LANE_TAGS.as_ptr().add(HALF) as *const __m128i);
        let mut selected = [0u32; HALF];

        for (b, batch) in batches.chunks_exact(LANES).enumerate() {
            let lo = _mm_loadu_si128(batch.as_ptr() as *const __m128i);
            let hi = _mm_loadu_si128(batch.as_ptr().add(HALF) as *const __m128i);

            let eq_lo = _mm_cmpeq_epi32(_mm_and_si128(lo, q), q);
            let eq_hi = _mm_cmpeq_epi32(_mm_and_si128(hi, q), q);
            let sel = _mm_or_si128(
                _mm_and_si128(eq_lo, tags_lo),
                _mm_and_si128(eq_hi, tags_hi));
            _mm_storeu_si128(selected.as_mut_ptr() as *mut __m128i, sel);

            if let Some(lane) = first_lane(or_4(selected)) {
                return Some(b * LANES + lane);
            }
        }
        None
    }

    /// # Safety
    /// The CPU must support SSE2.
    #[target_feature(enable = "sse2")]
    unsafe fn sse2_u16(batches: &[u16], query: u16) -> Option<usize> {
        debug_assert!(batches.len() % LANES == 0);

        let q = _mm_set1_epi16(query as i16);
        let tags = _mm_loadu_si128(u16::LANE_TAGS.as_ptr() as *const __m128i);
        let mut selected = [0u16; LANES];

        for (b, batch) in batches.chunks_exact(LANES).enumerate() {
            let v = _mm_loadu_si128(batch.as_ptr() as *const __m128i);
            let eq = _mm_cmpeq_epi16(_mm_and_si128(v, q), q);
            _mm_storeu_si128(
                selected.as_mut_ptr() as *mut __m128i,
                _mm_and_si128(eq, tags));

            if let Some(lane) = first_lane(or_8(selected)) {
                return Some(b * LANES + lane);
            }
        }
        None
    }
}
