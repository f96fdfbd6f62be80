//! Error handling for 3b parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when working with 3b files
#[derive(Debug, Error)]
pub enum ThreeBError {
    /// Not enough bytes left to read a header, chunk header or volume field
    #[error("Truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        /// Cursor position of the failed read
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes left in the buffer
        available: usize,
    },

    /// A chunk payload extends past the end of the buffer
    #[error("Chunk payload skip of {skip} bytes at offset {offset} exceeds buffer length {len}")]
    OutOfBoundsSkip {
        /// Start of the skipped payload
        offset: usize,
        /// Declared payload size
        skip: u64,
        /// Total buffer length
        len: usize,
    },

    /// Invalid magic value in the file header
    #[error("Invalid magic value: expected {expected:?}, found {found:?}")]
    InvalidMagic {
        /// The configured magic value
        expected: [u8; 4],
        /// The bytes found at offset 0
        found: [u8; 4],
    },

    /// The sanity marker after the magic was not 1
    #[error("Invalid sanity marker: expected 1, found {0}")]
    InvalidSanityMarker(u32),

    /// More chunks than the configured limit
    #[error("Chunk limit of {0} exceeded")]
    ChunkLimitExceeded(usize),

    /// Input buffer larger than the configured limit
    #[error("Buffer size {size} exceeds limit {limit}")]
    BufferTooLarge {
        /// Length of the input buffer
        size: u64,
        /// Configured maximum
        limit: u64,
    },

    /// Data validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Low-level decode or encode failure
    #[error("Binary encoding error: {0}")]
    Binrw(#[from] binrw::Error),

    /// An I/O error occurred while writing
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ThreeBError {
    /// Whether the error means the buffer ended early.
    ///
    /// Callers can treat these as "stop and keep the chunks decoded so far".
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedInput { .. } | Self::OutOfBoundsSkip { .. }
        )
    }

    pub(crate) fn truncated(offset: usize, needed: usize, len: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available: len.saturating_sub(offset),
        }
    }
}

/// Type alias for Results from 3b operations
pub type Result<T> = std::result::Result<T, ThreeBError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ThreeBError::truncated(10, 4, 12);
        assert_eq!(
            format!("{}", error),
            "Truncated input at offset 10: need 4 bytes, 2 available"
        );

        let error = ThreeBError::InvalidSanityMarker(7);
        assert_eq!(format!("{}", error), "Invalid sanity marker: expected 1, found 7");
    }

    #[test]
    fn test_truncation_grouping() {
        assert!(ThreeBError::truncated(0, 8, 3).is_truncation());
        assert!(
            ThreeBError::OutOfBoundsSkip {
                offset: 16,
                skip: 100,
                len: 20
            }
            .is_truncation()
        );
        assert!(!ThreeBError::ChunkLimitExceeded(1).is_truncation());
        assert!(!ThreeBError::ValidationError("x".into()).is_truncation());
    }

    #[test]
    fn test_truncated_past_end() {
        match ThreeBError::truncated(20, 4, 12) {
            ThreeBError::TruncatedInput { available, .. } => assert_eq!(available, 0),
            other => panic!("unexpected error: {other}"),
        }
    }
}
