//! Array construction parameters.

use crate::error::ArrayError;

/// Configuration for a [`ByteArray`](crate::ByteArray).
///
/// Fixes the element size and the two behaviour flags for the lifetime of
/// the array. Validated at construction; immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Size of one element in bytes. Must be non-zero.
    pub element_size: usize,

    /// Keep an all-zero element slot after the last logical element.
    ///
    /// The slot is readable at index `len()` but never counted in `len()`.
    pub zero_terminated: bool,

    /// Zero-fill every slot that becomes reachable without being written
    /// by the caller (e.g. when `set_len` grows the array).
    pub clear_on_alloc: bool,

    /// Number of element slots to allocate up front.
    ///
    /// Default: 0. The terminator slot of a zero-terminated array is
    /// allocated in addition to this.
    pub initial_capacity: usize,
}

impl ArrayConfig {
    /// Default up-front capacity in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 0;

    /// Create a config for elements of `element_size` bytes.
    ///
    /// Both flags default to off.
    pub fn new(element_size: usize) -> Self {
        Self {
            element_size,
            zero_terminated: false,
            clear_on_alloc: false,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Set whether the array keeps a trailing zero element.
    pub fn zero_terminated(mut self, on: bool) -> Self {
        self.zero_terminated = on;
        self
    }

    /// Set whether newly exposed slots are zero-filled.
    pub fn clear_on_alloc(mut self, on: bool) -> Self {
        self.clear_on_alloc = on;
        self
    }

    /// Set the number of element slots allocated at construction.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Number of slots held past the logical capacity (0 or 1).
    pub fn terminator_slots(&self) -> usize {
        usize::from(self.zero_terminated)
    }

    /// Check the parameters before any memory is allocated.
    pub fn validate(&self) -> Result<(), ArrayError> {
        if self.element_size == 0 {
            return Err(ArrayError::invalid("element size must be non-zero"));
        }
        Ok(())
    }
}
