//! Bit-level printing of elements and batches, for debugging only.

use std::fmt;

use crate::scan::ScanElement;

/// Displays an element as binary, most significant bit first, padded to
/// the element width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bits<T>(pub T);

impl<T: ScanElement> fmt::Display for Bits<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = T::BITS as usize)
    }
}

/// One line per lane.
pub fn lanes<T: ScanElement>(batch: &[T]) -> String {
    batch.iter()
        .map(|&e| Bits(e).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_width() {
        assert_eq!(Bits(0b101u16).to_string(), "0000000000000101");
        assert_eq!(Bits(u32::MAX).to_string(), "1".repeat(32));
    }

    #[test]
    fn one_line_per_lane() {
        let text = lanes(&[1u16, 2]);
        assert_eq!(text, "0000000000000001\n0000000000000010");
    }
}
