//! C FFI bindings for dynarr.
//!
//! Arrays live in a process-wide handle table; C callers only ever hold
//! opaque `u64` handles. Every entry point returns a [`DynarrStatus`] code
//! and catches panics before they cross the boundary. This is the only
//! crate in the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
// `#[no_mangle]` itself trips `unsafe_code`, so every exported fn carries
// `#[allow(unsafe_code)]` whether or not its body has an `unsafe` block.
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into `DynarrStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!($crate::status::DynarrStatus::Panicked as i32, $body)
    };
}

/// Run an FFI body, returning `$default` if it panics.
macro_rules! ffi_guard_or {
    ($default:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => {
                #[cfg(debug_assertions)]
                eprintln!("dynarr: panic caught at FFI boundary");
                $default
            }
        }
    };
}

/// Lock a mutex inside an FFI body, returning `InternalError` if poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::DynarrStatus::InternalError as i32,
        }
    };
}

pub mod array;
pub mod buffer;
mod handle;
pub mod status;

pub use status::DynarrStatus;
