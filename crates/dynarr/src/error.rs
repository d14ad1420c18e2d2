//! Array error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during array operations.
///
/// Every variant is returned before the array is mutated, so an array that
/// produced an error is still in its last valid state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A construction parameter or caller-supplied buffer was rejected
    /// (zero element size, value bytes that do not match the element count).
    InvalidArgument {
        /// Human-readable description of what was wrong.
        reason: String,
    },
    /// An index or range fell outside the readable or writable region.
    OutOfBounds {
        /// The offending index (for ranges, the exclusive end).
        index: usize,
        /// Logical length of the array at the time of the call.
        len: usize,
    },
    /// The buffer could not grow: the size overflowed `usize` or the
    /// allocator refused the request.
    AllocationFailed {
        /// Total buffer size in bytes that was requested.
        requested_bytes: usize,
    },
}

impl ArrayError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for array of length {len}")
            }
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "allocation failed: requested {requested_bytes} bytes")
            }
        }
    }
}

impl Error for ArrayError {}
