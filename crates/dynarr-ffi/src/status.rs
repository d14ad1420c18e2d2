//! C-compatible status codes.
//!
//! [`DynarrStatus`] is a `repr(i32)` enum returned by every FFI function.
//! `Ok` is 0 and every error is negative. Values are ABI-stable.

use dynarr::ArrayError;

/// C-compatible status code returned by all FFI functions.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynarrStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or the array was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, zero where it must not be, or otherwise invalid.
    InvalidArgument = -2,
    /// An index or range falls outside the array.
    OutOfBounds = -3,
    /// The array could not grow.
    AllocationFailed = -4,
    /// Caller-provided output buffer is smaller than one element.
    BufferTooSmall = -5,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -6,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ArrayError> for DynarrStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::InvalidArgument { .. } => DynarrStatus::InvalidArgument,
            ArrayError::OutOfBounds { .. } => DynarrStatus::OutOfBounds,
            ArrayError::AllocationFailed { .. } => DynarrStatus::AllocationFailed,
        }
    }
}
