//! Array lifecycle and element FFI: create, append, index, remove, free.
//!
//! Arrays are stored in the global `ARRAYS` table and addressed by
//! generational handles. The table lock is held for the duration of each
//! call; an individual array is still single-threaded by contract.

use std::sync::Mutex;

use dynarr::{ArrayConfig, ByteArray, Release};

use crate::buffer;
use crate::handle::HandleTable;
use crate::status::DynarrStatus;

static ARRAYS: Mutex<HandleTable<ByteArray>> = Mutex::new(HandleTable::new());

/// Run `op` on the array behind `handle` with the table locked.
fn with_array(
    handle: u64,
    op: impl FnOnce(&mut ByteArray) -> Result<(), DynarrStatus>,
) -> i32 {
    let mut arrays = ffi_lock!(ARRAYS);
    let Some(array) = arrays.get_mut(handle) else {
        return DynarrStatus::InvalidHandle as i32;
    };
    match op(array) {
        Ok(()) => DynarrStatus::Ok as i32,
        Err(status) => status as i32,
    }
}

/// Borrow `count` packed elements from a caller pointer.
///
/// `count == 0` never dereferences `ptr`, so it may be null.
///
/// # Safety
///
/// When `count > 0`, `ptr` must be valid for reads of
/// `count * element_size` bytes for the returned lifetime.
#[allow(unsafe_code)]
unsafe fn caller_elements<'a>(
    ptr: *const u8,
    count: usize,
    element_size: usize,
) -> Result<&'a [u8], DynarrStatus> {
    if count == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(DynarrStatus::InvalidArgument);
    }
    let len = count
        .checked_mul(element_size)
        .ok_or(DynarrStatus::InvalidArgument)?;
    // SAFETY: ptr is non-null and valid for len bytes per caller contract.
    Ok(unsafe { std::slice::from_raw_parts(ptr, len) })
}

fn status_of(result: Result<(), dynarr::ArrayError>) -> Result<(), DynarrStatus> {
    result.map_err(|e| DynarrStatus::from(&e))
}

// ── Lifecycle ───────────────────────────────────────────────────

/// Create an empty array of `element_size`-byte elements.
///
/// `zero_terminated` and `clear` are booleans (0 = off). On success writes
/// the handle to `out` and returns `DYNARR_STATUS_OK`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_create(
    element_size: usize,
    zero_terminated: u8,
    clear: u8,
    out: *mut u64,
) -> i32 {
    dynarr_create_sized(element_size, zero_terminated, clear, 0, out)
}

/// Create an empty array with room for `reserved` elements.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_create_sized(
    element_size: usize,
    zero_terminated: u8,
    clear: u8,
    reserved: usize,
    out: *mut u64,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        let config = ArrayConfig::new(element_size)
            .zero_terminated(zero_terminated != 0)
            .clear_on_alloc(clear != 0)
            .initial_capacity(reserved);
        let array = match ByteArray::with_config(config) {
            Ok(a) => a,
            Err(e) => return DynarrStatus::from(&e) as i32,
        };
        let handle = ffi_lock!(ARRAYS).insert(array);
        // SAFETY: out is non-null and valid per caller contract.
        unsafe { *out = handle };
        DynarrStatus::Ok as i32
    })
}

/// Destroy an array.
///
/// With `free_segment != 0` the buffer is released and `data_out` /
/// `len_out` are ignored (they may be null). With `free_segment == 0` the
/// array's bytes (plus the zero terminator, if any) are handed to the
/// caller through `data_out` / `len_out`; release them later with
/// `dynarr_buffer_free`. Both pointers must then be non-null, otherwise
/// `DYNARR_STATUS_INVALID_ARGUMENT` is returned and the array survives.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_free(
    handle: u64,
    free_segment: u8,
    data_out: *mut *mut u8,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let keep = free_segment == 0;
        if keep && (data_out.is_null() || len_out.is_null()) {
            return DynarrStatus::InvalidArgument as i32;
        }
        let array = match ffi_lock!(ARRAYS).remove(handle) {
            Some(a) => a,
            None => return DynarrStatus::InvalidHandle as i32,
        };
        if keep {
            let (data, len) = buffer::into_raw(array.into_bytes());
            // SAFETY: both pointers are non-null and valid per caller contract.
            unsafe {
                *data_out = data;
                *len_out = len;
            }
        } else {
            array.free(Release::Free);
        }
        DynarrStatus::Ok as i32
    })
}

/// Zero the array's whole buffer, then destroy it.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_wipe_free(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAYS).remove(handle) {
            Some(array) => {
                array.free(Release::Wipe);
                DynarrStatus::Ok as i32
            }
            None => DynarrStatus::InvalidHandle as i32,
        }
    })
}

// ── Insertion ───────────────────────────────────────────────────

/// Append one element read from `value` (`element_size` bytes).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_append_val(handle: u64, value: *const u8) -> i32 {
    dynarr_append_vals(handle, value, 1)
}

/// Append `count` packed elements read from `values`.
///
/// `values` may be null when `count == 0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_append_vals(handle: u64, values: *const u8, count: usize) -> i32 {
    ffi_guard!({
        with_array(handle, |array| {
            // SAFETY: values holds count elements per caller contract.
            let bytes = unsafe { caller_elements(values, count, array.element_size())? };
            status_of(array.append_many(bytes, count))
        })
    })
}

/// Insert `count` packed elements at the front.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_prepend_vals(handle: u64, values: *const u8, count: usize) -> i32 {
    ffi_guard!({
        with_array(handle, |array| {
            // SAFETY: values holds count elements per caller contract.
            let bytes = unsafe { caller_elements(values, count, array.element_size())? };
            status_of(array.prepend_many(bytes, count))
        })
    })
}

/// Insert `count` packed elements before `index` (`index <= len`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_insert_vals(
    handle: u64,
    index: usize,
    values: *const u8,
    count: usize,
) -> i32 {
    ffi_guard!({
        with_array(handle, |array| {
            // SAFETY: values holds count elements per caller contract.
            let bytes = unsafe { caller_elements(values, count, array.element_size())? };
            status_of(array.insert_many(index, bytes, count))
        })
    })
}

// ── Access ──────────────────────────────────────────────────────

/// Copy the element at `index` into `out`.
///
/// On a zero-terminated array `index == len` copies the zero terminator.
/// Returns `DYNARR_STATUS_BUFFER_TOO_SMALL` if `out_len` is less than the
/// element size.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_index(handle: u64, index: usize, out: *mut u8, out_len: usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        with_array(handle, |array| {
            if out_len < array.element_size() {
                return Err(DynarrStatus::BufferTooSmall);
            }
            let element = array.get(index).map_err(|e| DynarrStatus::from(&e))?;
            // SAFETY: out is valid for out_len >= element.len() bytes.
            unsafe {
                std::ptr::copy_nonoverlapping(element.as_ptr(), out, element.len());
            }
            Ok(())
        })
    })
}

/// Number of elements in the array.
///
/// **Ambiguity warning:** returns 0 for both "empty" and "invalid handle."
/// Prefer [`dynarr_len_get`] for unambiguous error detection.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_len(handle: u64) -> usize {
    ffi_guard_or!(0, {
        ARRAYS
            .lock()
            .ok()
            .and_then(|arrays| arrays.get(handle).map(ByteArray::len))
            .unwrap_or(0)
    })
}

/// Element count with explicit error reporting.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_len_get(handle: u64, out: *mut usize) -> i32 {
    read_property(handle, out, ByteArray::len)
}

/// Allocated element slots, excluding the terminator.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_capacity_get(handle: u64, out: *mut usize) -> i32 {
    read_property(handle, out, ByteArray::capacity)
}

/// Element size in bytes.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_element_size_get(handle: u64, out: *mut usize) -> i32 {
    read_property(handle, out, ByteArray::element_size)
}

#[allow(unsafe_code)]
fn read_property(handle: u64, out: *mut usize, property: fn(&ByteArray) -> usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        with_array(handle, |array| {
            // SAFETY: out is non-null and valid per caller contract.
            unsafe { *out = property(array) };
            Ok(())
        })
    })
}

// ── Removal and length ──────────────────────────────────────────

/// Remove the element at `index`, preserving the order of the rest.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_remove_index(handle: u64, index: usize) -> i32 {
    ffi_guard!({ with_array(handle, |array| status_of(array.remove_index(index))) })
}

/// Remove the element at `index` by moving the last element into it.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_remove_index_fast(handle: u64, index: usize) -> i32 {
    ffi_guard!({ with_array(handle, |array| status_of(array.remove_index_fast(index))) })
}

/// Remove `count` elements starting at `index`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_remove_range(handle: u64, index: usize, count: usize) -> i32 {
    ffi_guard!({ with_array(handle, |array| status_of(array.remove_range(index, count))) })
}

/// Set the array length, growing or truncating as needed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_set_size(handle: u64, len: usize) -> i32 {
    ffi_guard!({ with_array(handle, |array| status_of(array.set_len(len))) })
}
