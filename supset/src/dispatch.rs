use std::fmt;

use crate::{
    scalar,
    scan::{BatchScan, ScanElement},
};

/// Instruction set a batch kernel is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Scalar,
    Sse2,
    Avx2,
    /// `std::simd`, compiled only with the `portable_simd` feature.
    Portable,
}

impl Backend {
    /// Preference order. Native intrinsics go before `std::simd`.
    pub const WIDEST_FIRST: [Backend; 4] = [
        Backend::Avx2,
        Backend::Sse2,
        Backend::Portable,
        Backend::Scalar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
            Backend::Portable => "portable",
        }
    }

    pub fn from_name(name: &str) -> Option<Backend> {
        Backend::WIDEST_FIRST.iter()
            .copied()
            .find(|b| b.name() == name)
    }

    /// Whether this build and the running CPU can execute the backend.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Sse2 => has_sse2(),
            Backend::Avx2 => has_avx2(),
            Backend::Portable => cfg!(feature = "portable_simd"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[inline]
pub fn has_avx2() -> bool {
    is_x86_feature_detected!("avx2")
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
#[inline]
pub fn has_avx2() -> bool {
    false
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[inline]
pub fn has_sse2() -> bool {
    is_x86_feature_detected!("sse2")
}

#[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
#[inline]
pub fn has_sse2() -> bool {
    false
}

fn supports<T: ScanElement>(backend: Backend) -> bool {
    backend.is_available() && T::batch_scan(backend).is_some()
}

/// Backends usable for width `T` on this CPU, widest first. Always ends
/// with [`Backend::Scalar`].
pub fn available<T: ScanElement>() -> Vec<Backend> {
    Backend::WIDEST_FIRST.iter()
        .copied()
        .filter(|&b| supports::<T>(b))
        .collect()
}

pub fn best<T: ScanElement>() -> Backend {
    Backend::WIDEST_FIRST.iter()
        .copied()
        .find(|&b| supports::<T>(b))
        .unwrap_or(Backend::Scalar)
}

/// Kernel of [`best`].
pub fn batch_scan<T: ScanElement>() -> BatchScan<T> {
    T::batch_scan(best::<T>())
        .unwrap_or(scalar::tagged_batch_scan::<T>)
}
