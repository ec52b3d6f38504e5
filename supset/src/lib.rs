#![cfg_attr(feature = "portable_simd", feature(portable_simd))]

pub mod scan;
pub mod scalar;
pub mod dispatch;
pub mod instructions;
pub mod portable;
pub mod bits;
mod error;
mod util;

pub use error::ScanError;
pub use dispatch::Backend;
pub use scan::{
    ScanElement, BatchScan, SupersetScanner, SupersetScanner16, SupersetScanner32,
    LANES,
    superset_position, superset_position_with,
    find_superset, find_superset_or_sentinel,
    find_superset_u32, find_superset_u16,
    checked_find_superset,
    is_superset,
};
