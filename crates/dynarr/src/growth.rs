//! Capacity growth arithmetic.
//!
//! Growth is geometric: when a request does not fit, capacity becomes the
//! larger of the required size and twice the current capacity, with a
//! floor of [`MIN_GROW_CAPACITY`]. If the doubled size overflows, the plan
//! falls back to an exact fit before giving up.

use crate::error::ArrayError;

/// Smallest capacity (in elements) a growing array is given.
pub const MIN_GROW_CAPACITY: usize = 4;

/// Multiplier applied to the current capacity on growth.
pub const GROWTH_FACTOR: usize = 2;

/// A resolved growth request: the new capacity and its byte size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPlan {
    /// New capacity in elements, excluding the terminator slot.
    pub capacity: usize,
    /// Total buffer size in bytes, including the terminator slot.
    pub bytes: usize,
}

/// Byte size of a buffer holding `slots` elements of `element_size` bytes.
///
/// Returns `None` on `usize` overflow.
pub fn slot_bytes(slots: usize, element_size: usize) -> Option<usize> {
    slots.checked_mul(element_size)
}

/// Geometric target capacity for `required` elements.
///
/// Returns `current` unchanged if `required` already fits.
pub fn target_capacity(current: usize, required: usize) -> usize {
    if required <= current {
        return current;
    }
    let doubled = current.checked_mul(GROWTH_FACTOR).unwrap_or(required);
    required.max(doubled).max(MIN_GROW_CAPACITY)
}

/// Plan a buffer that fits `required` logical elements plus `terminator`
/// extra slots.
///
/// Tries the geometric target first, then an exact fit. Fails with
/// [`ArrayError::AllocationFailed`] when even the exact fit overflows.
pub fn plan(
    current: usize,
    required: usize,
    terminator: usize,
    element_size: usize,
) -> Result<GrowthPlan, ArrayError> {
    let geometric = target_capacity(current, required);
    for capacity in [geometric, required.max(current)] {
        let bytes = capacity
            .checked_add(terminator)
            .and_then(|slots| slot_bytes(slots, element_size));
        if let Some(bytes) = bytes {
            return Ok(GrowthPlan { capacity, bytes });
        }
    }
    Err(ArrayError::AllocationFailed {
        requested_bytes: usize::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_growth_uses_minimum() {
        assert_eq!(target_capacity(0, 1), MIN_GROW_CAPACITY);
    }

    #[test]
    fn growth_doubles_current_capacity() {
        assert_eq!(target_capacity(8, 9), 16);
    }

    #[test]
    fn large_request_wins_over_doubling() {
        assert_eq!(target_capacity(8, 100), 100);
    }

    #[test]
    fn fitting_request_keeps_capacity() {
        assert_eq!(target_capacity(8, 8), 8);
        assert_eq!(target_capacity(8, 0), 8);
    }

    #[test]
    fn doubling_overflow_falls_back_to_required() {
        let current = usize::MAX / 2 + 1;
        assert_eq!(target_capacity(current, current + 1), current + 1);
    }

    #[test]
    fn plan_counts_terminator_bytes() {
        let p = plan(0, 1, 1, 4).unwrap();
        assert_eq!(p.capacity, MIN_GROW_CAPACITY);
        assert_eq!(p.bytes, (MIN_GROW_CAPACITY + 1) * 4);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn plan_falls_back_to_exact_fit_when_doubled_bytes_overflow() {
        // 2^41 elements of 2^23 bytes overflows; 2^40 + 1 of them does not.
        let current = 1usize << 40;
        let p = plan(current, current + 1, 0, 1 << 23).unwrap();
        assert_eq!(p.capacity, current + 1);
        assert_eq!(p.bytes, (current + 1) << 23);
    }

    #[test]
    fn plan_overflow_is_allocation_failure() {
        let result = plan(0, usize::MAX, 1, 8);
        assert!(matches!(result, Err(ArrayError::AllocationFailed { .. })));
    }
}
