//! Byte-level array storage with a runtime element size.
//!
//! [`ByteArray`] owns a single `Vec<u8>` sized to `capacity` element slots,
//! plus one terminator slot when the array is zero-terminated. The whole
//! buffer is always initialised: growth appends zeroes, so filler that was
//! never written reads as zero even without `clear_on_alloc`.

use std::fmt;
use std::ops::Range;

use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::growth;
use crate::release::{self, Release};

/// A growable array of fixed-size, untyped elements.
///
/// Elements are opaque byte strings of exactly `element_size` bytes.
/// Indices are element indices, never byte offsets.
///
/// Every mutating method either succeeds completely or returns an error
/// without touching the array.
#[derive(Clone)]
pub struct ByteArray {
    /// Backing storage: `(capacity + terminator_slots) * element_size` bytes.
    data: Vec<u8>,
    /// Number of logical elements.
    len: usize,
    /// Element slots available to logical elements (terminator excluded).
    capacity: usize,
    config: ArrayConfig,
}

impl ByteArray {
    /// Create an empty array.
    ///
    /// Fails with [`ArrayError::InvalidArgument`] if `element_size` is zero.
    pub fn new(
        element_size: usize,
        zero_terminated: bool,
        clear_on_alloc: bool,
    ) -> Result<Self, ArrayError> {
        Self::with_config(
            ArrayConfig::new(element_size)
                .zero_terminated(zero_terminated)
                .clear_on_alloc(clear_on_alloc),
        )
    }

    /// Create an empty array from a full config.
    ///
    /// Allocates `initial_capacity` slots (plus the terminator slot) up
    /// front, all zeroed.
    pub fn with_config(config: ArrayConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        let mut array = Self {
            data: Vec::new(),
            len: 0,
            capacity: 0,
            config,
        };
        let bytes = config
            .initial_capacity
            .checked_add(config.terminator_slots())
            .and_then(|slots| growth::slot_bytes(slots, config.element_size))
            .ok_or(ArrayError::AllocationFailed {
                requested_bytes: usize::MAX,
            })?;
        array.grow_buffer(config.initial_capacity, bytes)?;
        array.check_invariants();
        Ok(array)
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Number of logical elements. Never counts the terminator slot.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no logical elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element slots currently allocated, excluding the terminator slot.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        self.config.element_size
    }

    /// Whether the array keeps a zero element at index `len()`.
    pub fn is_zero_terminated(&self) -> bool {
        self.config.zero_terminated
    }

    /// Whether newly exposed slots are zero-filled.
    pub fn clears_on_alloc(&self) -> bool {
        self.config.clear_on_alloc
    }

    /// The configuration the array was created with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Size of the backing buffer in bytes, terminator and filler included.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }

    /// The logical elements as one contiguous byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len * self.config.element_size]
    }

    /// Mutable view of the logical elements.
    ///
    /// The terminator slot is not included, so it cannot be overwritten.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let end = self.len * self.config.element_size;
        &mut self.data[..end]
    }

    /// The logical elements followed by the terminator slot, if any.
    pub fn as_bytes_with_terminator(&self) -> &[u8] {
        &self.data[..self.terminated_bytes()]
    }

    /// Iterate over the logical elements, one byte slice per element.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.as_bytes().chunks_exact(self.config.element_size)
    }

    // ── Element access ──────────────────────────────────────────

    /// Read the element at `index`.
    ///
    /// Valid indices are `0..len()`. A zero-terminated array also accepts
    /// `len()` and returns the all-zero terminator.
    pub fn get(&self, index: usize) -> Result<&[u8], ArrayError> {
        let readable = self.len + self.config.terminator_slots();
        if index >= readable {
            return Err(self.out_of_bounds(index));
        }
        Ok(&self.data[self.slot(index)])
    }

    /// Mutable access to the element at `index` (`0..len()` only).
    pub fn get_mut(&mut self, index: usize) -> Result<&mut [u8], ArrayError> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let slot = self.slot(index);
        Ok(&mut self.data[slot])
    }

    /// Overwrite the element at `index` with `value`.
    pub fn set(&mut self, index: usize, value: &[u8]) -> Result<(), ArrayError> {
        self.check_values(value, 1)?;
        self.get_mut(index)?.copy_from_slice(value);
        Ok(())
    }

    // ── Insertion ───────────────────────────────────────────────

    /// Append one element.
    pub fn append_one(&mut self, value: &[u8]) -> Result<(), ArrayError> {
        self.append_many(value, 1)
    }

    /// Append `count` elements packed back to back in `values`.
    ///
    /// `values` must be exactly `count * element_size()` bytes.
    pub fn append_many(&mut self, values: &[u8], count: usize) -> Result<(), ArrayError> {
        self.insert_many(self.len, values, count)
    }

    /// Insert `count` elements at the front, shifting everything up.
    pub fn prepend_many(&mut self, values: &[u8], count: usize) -> Result<(), ArrayError> {
        self.insert_many(0, values, count)
    }

    /// Insert `count` elements before `index`, shifting `index..len()` up.
    ///
    /// `index == len()` appends. `index > len()` is out of bounds.
    pub fn insert_many(
        &mut self,
        index: usize,
        values: &[u8],
        count: usize,
    ) -> Result<(), ArrayError> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        self.check_values(values, count)?;
        if count == 0 {
            return Ok(());
        }
        let new_len = self
            .len
            .checked_add(count)
            .ok_or(ArrayError::AllocationFailed {
                requested_bytes: usize::MAX,
            })?;
        self.ensure_capacity(new_len)?;

        let inserted = self.span(index, count);
        let tail = self.span(index, self.len - index);
        let dest = inserted.end;
        self.data.copy_within(tail, dest);
        self.data[inserted].copy_from_slice(values);
        self.len = new_len;
        self.terminate();
        self.check_invariants();
        Ok(())
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Remove the element at `index`, shifting later elements down by one.
    ///
    /// Order of the remaining elements is preserved. O(len - index).
    pub fn remove_index(&mut self, index: usize) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        self.remove_range(index, 1)
    }

    /// Remove the element at `index` by moving the last element into its
    /// place. O(1); does not preserve order.
    pub fn remove_index_fast(&mut self, index: usize) -> Result<(), ArrayError> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let last = self.len - 1;
        if index != last {
            let from = self.slot(last);
            let dest = self.slot(index).start;
            self.data.copy_within(from, dest);
        }
        self.len = last;
        self.vacate(last, 1);
        self.terminate();
        self.check_invariants();
        Ok(())
    }

    /// Remove `count` elements starting at `index`, preserving order.
    ///
    /// Fails if `index + count` exceeds `len()`. `count == 0` is a no-op
    /// for any `index <= len()`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ArrayError> {
        let end = index
            .checked_add(count)
            .ok_or_else(|| self.out_of_bounds(usize::MAX))?;
        if end > self.len {
            return Err(self.out_of_bounds(end));
        }
        if count == 0 {
            return Ok(());
        }
        let tail = self.span(end, self.len - end);
        let dest = self.slot(index).start;
        self.data.copy_within(tail, dest);
        self.len -= count;
        self.vacate(self.len, count);
        self.terminate();
        self.check_invariants();
        Ok(())
    }

    // ── Length and capacity ─────────────────────────────────────

    /// Set the logical length.
    ///
    /// Growing exposes filler slots; they are zeroed first when the array
    /// was created with `clear_on_alloc`. Shrinking drops trailing elements.
    pub fn set_len(&mut self, new_len: usize) -> Result<(), ArrayError> {
        if new_len > self.len {
            self.ensure_capacity(new_len)?;
            if self.config.clear_on_alloc {
                let exposed = self.span(self.len, new_len - self.len);
                self.data[exposed].fill(0);
            }
            self.len = new_len;
            self.terminate();
            self.check_invariants();
        } else {
            self.truncate(new_len);
        }
        Ok(())
    }

    /// Shorten the array to `len` elements. No-op if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let dropped = self.len - len;
        self.len = len;
        self.vacate(len, dropped);
        self.terminate();
        self.check_invariants();
    }

    /// Remove every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensure room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::AllocationFailed {
                requested_bytes: usize::MAX,
            })?;
        self.ensure_capacity(required)?;
        self.check_invariants();
        Ok(())
    }

    // ── Release ─────────────────────────────────────────────────

    /// Release the array according to `mode`.
    ///
    /// Returns the buffer only for [`Release::Keep`].
    pub fn free(self, mode: Release) -> Option<Vec<u8>> {
        let keep_bytes = self.terminated_bytes();
        release::apply(mode, self.data, keep_bytes)
    }

    /// Take the logical bytes (and terminator slot, if any) out of the array.
    pub fn into_bytes(mut self) -> Vec<u8> {
        let keep_bytes = self.terminated_bytes();
        self.data.truncate(keep_bytes);
        self.data
    }

    // ── Internals ───────────────────────────────────────────────

    /// Byte range of the slot at `index`.
    fn slot(&self, index: usize) -> Range<usize> {
        self.span(index, 1)
    }

    /// Byte range of `count` slots starting at `index`.
    ///
    /// Callers only pass ranges within the allocated buffer, whose byte
    /// size was overflow-checked when it was allocated.
    fn span(&self, index: usize, count: usize) -> Range<usize> {
        let size = self.config.element_size;
        index * size..(index + count) * size
    }

    fn terminated_bytes(&self) -> usize {
        (self.len + self.config.terminator_slots()) * self.config.element_size
    }

    fn out_of_bounds(&self, index: usize) -> ArrayError {
        ArrayError::OutOfBounds {
            index,
            len: self.len,
        }
    }

    /// Reject value buffers that are not exactly `count` elements long.
    fn check_values(&self, values: &[u8], count: usize) -> Result<(), ArrayError> {
        let expected = growth::slot_bytes(count, self.config.element_size)
            .ok_or_else(|| ArrayError::invalid(format!("element count {count} overflows")))?;
        if values.len() != expected {
            return Err(ArrayError::invalid(format!(
                "expected {expected} bytes for {count} elements of size {}, got {}",
                self.config.element_size,
                values.len()
            )));
        }
        Ok(())
    }

    /// Grow so that `required` logical elements fit. No-op if they do.
    fn ensure_capacity(&mut self, required: usize) -> Result<(), ArrayError> {
        if required <= self.capacity {
            return Ok(());
        }
        let plan = growth::plan(
            self.capacity,
            required,
            self.config.terminator_slots(),
            self.config.element_size,
        )?;
        self.grow_buffer(plan.capacity, plan.bytes)
    }

    /// Extend the buffer to `bytes`, recording `capacity` on success.
    ///
    /// The reservation happens before anything is modified, so a refused
    /// allocation leaves the array untouched.
    fn grow_buffer(&mut self, capacity: usize, bytes: usize) -> Result<(), ArrayError> {
        let additional = bytes.saturating_sub(self.data.len());
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| ArrayError::AllocationFailed {
                requested_bytes: bytes,
            })?;
        self.data.resize(bytes, 0);
        self.capacity = capacity;
        Ok(())
    }

    /// Zero `count` slots from `index` if the array clears its filler.
    fn vacate(&mut self, index: usize, count: usize) {
        if self.config.clear_on_alloc {
            let range = self.span(index, count);
            self.data[range].fill(0);
        }
    }

    /// Re-establish the zero terminator at index `len`.
    fn terminate(&mut self) {
        if self.config.zero_terminated {
            let slot = self.slot(self.len);
            self.data[slot].fill(0);
        }
    }

    fn check_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let size = self.config.element_size;
            let slots = self.capacity + self.config.terminator_slots();
            assert!(
                self.len <= self.capacity,
                "dynarr: length {} exceeds capacity {}",
                self.len,
                self.capacity
            );
            assert_eq!(
                self.data.len(),
                slots * size,
                "dynarr: buffer holds {} bytes, expected {} slots of {} bytes",
                self.data.len(),
                slots,
                size
            );
            if self.config.zero_terminated {
                assert!(
                    self.data[self.slot(self.len)].iter().all(|&b| b == 0),
                    "dynarr: terminator slot at index {} is not zero",
                    self.len
                );
            }
        }
    }
}

impl fmt::Debug for ByteArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArray")
            .field("element_size", &self.config.element_size)
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("zero_terminated", &self.config.zero_terminated)
            .field("clear_on_alloc", &self.config.clear_on_alloc)
            .finish()
    }
}

/// Arrays are equal when their configs and logical elements are equal.
/// Filler and spare capacity are ignored.
impl PartialEq for ByteArray {
    fn eq(&self, other: &Self) -> bool {
        self.config.element_size == other.config.element_size
            && self.config.zero_terminated == other.config.zero_terminated
            && self.config.clear_on_alloc == other.config.clear_on_alloc
            && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteArray {}
