//! Growable arrays with a runtime element size.
//!
//! The storage layer is [`ByteArray`]: a contiguous, exclusively owned byte
//! buffer divided into fixed-size element slots. [`DynArray`] layers a typed
//! view over it for any [`Element`] type. Both share the same growth math,
//! bounds checks and zero-termination handling.
//!
//! # Layout
//!
//! ```text
//! ByteArray
//! ├── ArrayConfig (element_size, zero_terminated, clear_on_alloc; fixed at creation)
//! └── Vec<u8> buffer: (capacity + terminator) * element_size bytes
//!     ├── [0, len)          caller-written elements
//!     ├── [len]             terminator slot (all-zero, zero-terminated arrays only)
//!     └── (len, capacity]   filler, zeroed only when clear_on_alloc is set
//! ```
//!
//! # Guarantees
//!
//! - Every index is checked; out-of-range access returns
//!   [`ArrayError::OutOfBounds`] instead of touching memory.
//! - Every mutating operation is all-or-nothing: a failed growth leaves
//!   length and contents exactly as they were.
//! - In debug builds the layout invariants are re-checked after each
//!   mutating operation.
//!
//! No `unsafe`. All storage is a zero-initialised `Vec<u8>`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bytes;
pub mod config;
pub mod element;
pub mod error;
pub mod growth;
pub mod release;
pub mod typed;

// Public re-exports for the primary API surface.
pub use bytes::ByteArray;
pub use config::ArrayConfig;
pub use element::Element;
pub use error::ArrayError;
pub use release::Release;
pub use typed::DynArray;
