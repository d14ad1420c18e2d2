//! Fixed-size element encoding for the typed view.

/// A value that can be stored in a [`DynArray`](crate::DynArray).
///
/// Elements are stored as `SIZE` native-endian bytes. Decoding an all-zero
/// slot must produce the type's zero value, which is what a zero-terminated
/// array returns at index `len()`.
pub trait Element: Copy + 'static {
    /// Encoded size in bytes. Must be non-zero.
    const SIZE: usize;

    /// Encode `self` into `out`, which is exactly `SIZE` bytes long.
    fn write_to(&self, out: &mut [u8]);

    /// Decode a value from `bytes`, which is exactly `SIZE` bytes long.
    fn read_from(bytes: &[u8]) -> Self;
}

macro_rules! impl_element_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Element for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn write_to(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn read_from(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_element_for_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl<const N: usize> Element for [u8; N] {
    const SIZE: usize = N;

    fn write_to(&self, out: &mut [u8]) {
        out.copy_from_slice(self);
    }

    fn read_from(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        raw
    }
}
