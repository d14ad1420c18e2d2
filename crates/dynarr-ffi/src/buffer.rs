//! Byte buffers whose ownership has been transferred to the C caller.
//!
//! `dynarr_free` with `free_segment == 0` hands the array's bytes out as a
//! `(pointer, length)` pair. The caller owns that allocation until it
//! passes the exact same pair back to [`dynarr_buffer_free`].

use crate::status::DynarrStatus;

/// Leak `bytes` as a raw `(pointer, length)` pair for the caller.
pub(crate) fn into_raw(bytes: Vec<u8>) -> (*mut u8, usize) {
    let boxed = bytes.into_boxed_slice();
    let len = boxed.len();
    (Box::into_raw(boxed).cast::<u8>(), len)
}

/// Release a buffer previously handed out by `dynarr_free`.
///
/// `data` and `len` must be exactly the values written by `dynarr_free`,
/// and each buffer may be released only once.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dynarr_buffer_free(data: *mut u8, len: usize) -> i32 {
    ffi_guard!({
        if data.is_null() {
            return DynarrStatus::InvalidArgument as i32;
        }
        // SAFETY: data/len describe a boxed slice leaked by `into_raw`,
        // and the caller releases it exactly once.
        unsafe { drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(data, len))) };
        DynarrStatus::Ok as i32
    })
}
