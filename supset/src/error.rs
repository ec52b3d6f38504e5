use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// An explicit length reached past the end of the sequence.
    LengthOutOfBounds { len: usize, available: usize },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::LengthOutOfBounds { len, available } =>
                write!(f, "scan length {} exceeds sequence of {} elements", len, available),
        }
    }
}

impl std::error::Error for ScanError {}
