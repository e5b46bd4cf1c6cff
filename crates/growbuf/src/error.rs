// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// An error returned by a [`GrowableBuffer`][crate::GrowableBuffer] operation.
///
/// Every error is reported synchronously by the call that caused it. A failed call never modifies
/// the bytes already written to the buffer, nor its logical size.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An integer value does not fit the width and signedness of the requested write.
    #[error("value {value} is out of range, it must be >= {min} and <= {max}")]
    OutOfRange {
        /// The rejected value.
        value: i64,
        /// The smallest value the write accepts.
        min: i64,
        /// The largest value the write accepts.
        max: i64,
    },

    /// A finite floating point value is too large in magnitude to be represented as `f32`.
    #[error("value {value} is out of range for a single-precision float")]
    FloatOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// A variable-width integer write was requested with an unsupported width.
    #[error("byte length {0} is not supported, it must be between 1 and {max}", max = crate::MAX_INT_BYTE_LENGTH)]
    InvalidByteLength(usize),

    /// The backing storage could not be grown or reallocated to the requested size.
    #[error("failed to allocate {requested} bytes of buffer capacity")]
    AllocationFailed {
        /// The total capacity that was requested, saturated at `usize::MAX` if it overflowed.
        requested: usize,
    },
}

/// A specialized `Result` for use with buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a buffer error as a standard I/O error.
///
/// This is used when the buffer is driven through `std::io::Write`.
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::AllocationFailed { .. } => Self::new(std::io::ErrorKind::OutOfMemory, value),
            _ => Self::other(value),
        }
    }
}
