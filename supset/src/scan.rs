use std::fmt;

use num::PrimInt;

use crate::{
    dispatch::{self, Backend},
    instructions, portable, scalar,
    ScanError,
};

/// Elements per batch, for every width.
pub const LANES: usize = 8;

/// Scans a run of whole batches (`batches.len()` is a multiple of
/// [`LANES`]) and returns the index of the leftmost superset of `query`.
pub type BatchScan<T> = fn(batches: &[T], query: T) -> Option<usize>;

/// An unsigned integer read as a bit set over `BITS` positions.
pub trait ScanElement: PrimInt + fmt::Debug + fmt::Binary + Send + Sync + 'static {
    /// All ones. Returned by the sentinel contract when nothing matches,
    /// and equally a legal element value.
    const SENTINEL: Self;
    const BITS: u32;
    /// Lane `k` is tagged with bit `k`, so lower lanes carry lower bits.
    const LANE_TAGS: [Self; LANES];

    /// Batch kernel of this width for `backend`, if one exists. Whether the
    /// running CPU supports it is a separate question, see
    /// [`Backend::is_available`].
    fn batch_scan(backend: Backend) -> Option<BatchScan<Self>>;
}

impl ScanElement for u32 {
    const SENTINEL: Self = u32::MAX;
    const BITS: u32 = u32::BITS;
    const LANE_TAGS: [Self; LANES] = [1, 2, 4, 8, 16, 32, 64, 128];

    fn batch_scan(backend: Backend) -> Option<BatchScan<Self>> {
        match backend {
            Backend::Scalar => Some(scalar::tagged_batch_scan::<u32>),
            Backend::Sse2 => instructions::sse2_u32(),
            Backend::Avx2 => instructions::avx2_u32(),
            Backend::Portable => portable::u32x8(),
        }
    }
}

impl ScanElement for u16 {
    const SENTINEL: Self = u16::MAX;
    const BITS: u32 = u16::BITS;
    const LANE_TAGS: [Self; LANES] = [1, 2, 4, 8, 16, 32, 64, 128];

    fn batch_scan(backend: Backend) -> Option<BatchScan<Self>> {
        match backend {
            Backend::Scalar => Some(scalar::tagged_batch_scan::<u16>),
            Backend::Sse2 => instructions::sse2_u16(),
            // 8 x u16 already fits one 128-bit register.
            Backend::Avx2 => None,
            Backend::Portable => portable::u16x8(),
        }
    }
}

/// True iff every bit of `query` is set in `element`.
#[inline]
pub fn is_superset<T: PrimInt>(element: T, query: T) -> bool {
    (element & query) == query
}

/// Runs `batch_scan` over the whole batches of `set`, then finishes the
/// remaining `set.len() % LANES` elements one at a time.
#[inline]
pub fn superset_position_with<T>(set: &[T], query: T, batch_scan: BatchScan<T>) -> Option<usize>
where
    T: ScanElement,
{
    let st = (set.len() / LANES) * LANES;
    let (batches, tail) = set.split_at(st);

    batch_scan(batches, query)
        .or_else(|| scalar::naive_position(tail, query).map(|i| st + i))
}

/// Index of the leftmost element of `set` containing every bit of `query`,
/// using the widest kernel the running CPU supports.
pub fn superset_position<T: ScanElement>(set: &[T], query: T) -> Option<usize> {
    superset_position_with(set, query, dispatch::batch_scan::<T>())
}

pub fn find_superset<T: ScanElement>(set: &[T], query: T) -> Option<T> {
    superset_position(set, query).map(|i| set[i])
}

/// Sentinel contract: the leftmost superset of `query`, or all ones if
/// there is none. A matching element that is itself all ones is returned
/// too and cannot be told apart from a miss; use [`find_superset`] when
/// that matters.
pub fn find_superset_or_sentinel<T: ScanElement>(set: &[T], query: T) -> T {
    find_superset(set, query).unwrap_or(T::SENTINEL)
}

pub fn find_superset_u32(set: &[u32], query: u32) -> u32 {
    find_superset_or_sentinel(set, query)
}

pub fn find_superset_u16(set: &[u16], query: u16) -> u16 {
    find_superset_or_sentinel(set, query)
}

/// Sentinel contract over the first `len` elements of `set`, rejecting a
/// `len` that reaches past the slice.
pub fn checked_find_superset<T: ScanElement>(set: &[T], len: usize, query: T) -> Result<T, ScanError> {
    let prefix = set.get(..len)
        .ok_or(ScanError::LengthOutOfBounds { len, available: set.len() })?;
    Ok(find_superset_or_sentinel(prefix, query))
}

/// First-superset scanner bound to one backend.
///
/// Holds no state besides the selected kernel, so it is freely copied and
/// shared across threads.
#[derive(Clone, Copy)]
pub struct SupersetScanner<T: ScanElement> {
    backend: Backend,
    batch_scan: BatchScan<T>,
}

pub type SupersetScanner32 = SupersetScanner<u32>;
pub type SupersetScanner16 = SupersetScanner<u16>;

impl<T: ScanElement> SupersetScanner<T> {
    /// Scanner using the widest backend available on this CPU.
    pub fn new() -> Self {
        Self::with_backend(dispatch::best::<T>())
            .unwrap_or_else(Self::scalar)
    }

    /// `None` if `backend` has no kernel for this width or the CPU lacks it.
    pub fn with_backend(backend: Backend) -> Option<Self> {
        if !backend.is_available() {
            return None;
        }
        T::batch_scan(backend).map(|batch_scan| Self { backend, batch_scan })
    }

    pub fn scalar() -> Self {
        Self {
            backend: Backend::Scalar,
            batch_scan: scalar::tagged_batch_scan::<T>,
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn position(&self, set: &[T], query: T) -> Option<usize> {
        superset_position_with(set, query, self.batch_scan)
    }

    pub fn find(&self, set: &[T], query: T) -> Option<T> {
        self.position(set, query).map(|i| set[i])
    }

    /// Sentinel contract, see [`find_superset_or_sentinel`].
    pub fn scan(&self, set: &[T], query: T) -> T {
        self.find(set, query).unwrap_or(T::SENTINEL)
    }
}

impl<T: ScanElement> fmt::Debug for SupersetScanner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupersetScanner")
            .field("backend", &self.backend)
            .finish()
    }
}

impl<T: ScanElement> Default for SupersetScanner<T> {
    fn default() -> Self {
        Self::new()
    }
}
