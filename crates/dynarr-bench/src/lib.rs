//! Benchmark workloads for dynarr.
//!
//! - [`removal_indices`]: deterministic pseudo-random removal positions
//! - [`filled_array`]: an `i32` array holding `0..len`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr::{ArrayError, DynArray};

/// Build an `i32` array holding `0..len`.
pub fn filled_array(len: usize, zero_terminated: bool) -> Result<DynArray<i32>, ArrayError> {
    let mut array = DynArray::new(zero_terminated, false)?;
    array.reserve(len)?;
    for i in 0..len {
        array.push(i as i32)?;
    }
    Ok(array)
}

/// Generate `n` removal positions for an array that starts with `len`
/// elements and shrinks by one per removal.
///
/// Each index is valid at the moment it is used. Positions come from a
/// simple LCG keyed on `seed`, so runs are reproducible.
pub fn removal_indices(len: usize, n: usize, seed: u64) -> Vec<usize> {
    let n = n.min(len);
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % (len - i) as u64) as usize
        })
        .collect()
}
