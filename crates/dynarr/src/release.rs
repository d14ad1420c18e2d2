//! Buffer release modes for [`ByteArray::free`](crate::ByteArray::free).

use zeroize::Zeroize;

/// What to do with the backing buffer when an array is freed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Release {
    /// Deallocate the buffer. Equivalent to dropping the array.
    #[default]
    Free,
    /// Zero every byte of the buffer (elements, filler and terminator),
    /// then deallocate it.
    Wipe,
    /// Hand the buffer to the caller instead of deallocating it.
    ///
    /// The returned bytes cover the logical elements, followed by the
    /// terminator slot when the array is zero-terminated.
    Keep,
}

/// Apply `mode` to an owned buffer whose first `keep_bytes` are meaningful.
///
/// Returns the buffer only for [`Release::Keep`].
pub(crate) fn apply(mode: Release, mut buffer: Vec<u8>, keep_bytes: usize) -> Option<Vec<u8>> {
    match mode {
        Release::Free => None,
        Release::Wipe => {
            buffer.zeroize();
            None
        }
        Release::Keep => {
            buffer.truncate(keep_bytes);
            Some(buffer)
        }
    }
}
