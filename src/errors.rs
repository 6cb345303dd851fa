//! This module defines errors returned by the library.
use core::fmt::Debug;
use thiserror::Error;

/// Errors returned by polyarith
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PolyError {
  /// returned when a field element that must be inverted is zero
  #[error("DivisionByZero")]
  DivisionByZero,
  /// returned if a requested evaluation domain is not a power of two or exceeds the field's
  /// two-adicity
  #[error("InvalidDomainSize: size {size}, max log2 size {max_log2_size}")]
  InvalidDomainSize {
    /// The requested domain size
    size: usize,
    /// The largest supported `log2` domain size for the field
    max_log2_size: u32,
  },
  /// returned if a chunked polynomial cannot be laid out in equal power-of-two segments
  #[error("InvalidChunking: {reason}")]
  InvalidChunking {
    /// The reason the segments were rejected
    reason: String,
  },
  /// returned if the supplied input is not of the right length
  #[error("InvalidInputLength: expected {expected}, got {actual}")]
  InvalidInputLength {
    /// The length the operation requires
    expected: usize,
    /// The length that was supplied
    actual: usize,
  },
}
