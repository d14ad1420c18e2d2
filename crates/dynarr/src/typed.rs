//! Typed view over a [`ByteArray`].

use std::fmt;
use std::marker::PhantomData;

use crate::bytes::ByteArray;
use crate::config::ArrayConfig;
use crate::element::Element;
use crate::error::ArrayError;
use crate::release::Release;

/// A growable array of `T` values backed by a [`ByteArray`] whose element
/// size is `T::SIZE`.
///
/// All operations share the byte array's bounds checks and all-or-nothing
/// growth; values are encoded on the way in and decoded on the way out.
pub struct DynArray<T: Element> {
    raw: ByteArray,
    _marker: PhantomData<T>,
}

impl<T: Element> DynArray<T> {
    /// Create an empty array.
    pub fn new(zero_terminated: bool, clear_on_alloc: bool) -> Result<Self, ArrayError> {
        Self::with_config(
            ArrayConfig::new(T::SIZE)
                .zero_terminated(zero_terminated)
                .clear_on_alloc(clear_on_alloc),
        )
    }

    /// Create an empty array from a config.
    ///
    /// `config.element_size` must equal `T::SIZE`.
    pub fn with_config(config: ArrayConfig) -> Result<Self, ArrayError> {
        if config.element_size != T::SIZE {
            return Err(ArrayError::invalid(format!(
                "element size {} does not match type size {}",
                config.element_size,
                T::SIZE
            )));
        }
        ByteArray::with_config(config).map(|raw| Self {
            raw,
            _marker: PhantomData,
        })
    }

    /// Create an array holding a copy of `values`.
    pub fn from_slice(values: &[T], zero_terminated: bool) -> Result<Self, ArrayError> {
        let mut array = Self::with_config(
            ArrayConfig::new(T::SIZE)
                .zero_terminated(zero_terminated)
                .initial_capacity(values.len()),
        )?;
        array.extend_from_slice(values)?;
        Ok(array)
    }

    /// Wrap an existing byte array. Fails if its element size is not `T::SIZE`.
    pub fn from_raw(raw: ByteArray) -> Result<Self, ArrayError> {
        if raw.element_size() != T::SIZE {
            return Err(ArrayError::invalid(format!(
                "element size {} does not match type size {}",
                raw.element_size(),
                T::SIZE
            )));
        }
        Ok(Self {
            raw,
            _marker: PhantomData,
        })
    }

    /// The underlying byte array.
    pub fn as_raw(&self) -> &ByteArray {
        &self.raw
    }

    /// Unwrap into the underlying byte array.
    pub fn into_raw(self) -> ByteArray {
        self.raw
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Allocated element slots, excluding the terminator.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Read the value at `index`.
    ///
    /// On a zero-terminated array `index == len()` yields the zero value.
    pub fn get(&self, index: usize) -> Result<T, ArrayError> {
        self.raw.get(index).map(T::read_from)
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        value.write_to(self.raw.get_mut(index)?);
        Ok(())
    }

    /// Append one value.
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        self.raw.append_one(&encode(&[value]))
    }

    /// Append every value in `values`.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), ArrayError> {
        self.raw.append_many(&encode(values), values.len())
    }

    /// Insert `value` before `index`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ArrayError> {
        self.insert_slice(index, &[value])
    }

    /// Insert `values` before `index`, keeping their order.
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), ArrayError> {
        self.raw.insert_many(index, &encode(values), values.len())
    }

    /// Insert `values` at the front.
    pub fn prepend_slice(&mut self, values: &[T]) -> Result<(), ArrayError> {
        self.raw.prepend_many(&encode(values), values.len())
    }

    /// Remove and return the value at `index`, preserving order.
    pub fn remove_index(&mut self, index: usize) -> Result<T, ArrayError> {
        let value = self.element(index)?;
        self.raw.remove_index(index)?;
        Ok(value)
    }

    /// Remove and return the value at `index`, filling the hole with the
    /// last element.
    pub fn remove_index_fast(&mut self, index: usize) -> Result<T, ArrayError> {
        let value = self.element(index)?;
        self.raw.remove_index_fast(index)?;
        Ok(value)
    }

    /// Remove `count` values starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ArrayError> {
        self.raw.remove_range(index, count)
    }

    /// Remove and return the last value, if any.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        self.remove_index(last).ok()
    }

    /// Set the logical length. See [`ByteArray::set_len`].
    pub fn set_len(&mut self, len: usize) -> Result<(), ArrayError> {
        self.raw.set_len(len)
    }

    /// Shorten the array to `len` values.
    pub fn truncate(&mut self, len: usize) {
        self.raw.truncate(len);
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Ensure room for `additional` more values.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        self.raw.reserve(additional)
    }

    /// Iterate over the values in order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.raw.iter().map(T::read_from)
    }

    /// Copy the values into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Release the array. See [`ByteArray::free`].
    pub fn free(self, mode: Release) -> Option<Vec<u8>> {
        self.raw.free(mode)
    }

    /// Read a logical element; the terminator is not an element.
    fn element(&self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len() {
            return Err(ArrayError::OutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.get(index)
    }
}

fn encode<T: Element>(values: &[T]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * T::SIZE];
    for (value, out) in values.iter().zip(bytes.chunks_exact_mut(T::SIZE)) {
        value.write_to(out);
    }
    bytes
}

impl<T: Element> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Element> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: Element> Eq for DynArray<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_get() {
        let mut array = DynArray::<i32>::new(false, false).unwrap();
        array.push(27).unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array.get(0), Ok(27));
    }

    #[test]
    fn zero_terminated_get_at_len_is_zero() {
        let mut array = DynArray::<i32>::new(true, false).unwrap();
        array.push(27).unwrap();
        assert_eq!(array.get(1), Ok(0));
        assert!(array.get(2).is_err());
    }

    #[test]
    fn remove_index_returns_removed_value() {
        let mut array = DynArray::from_slice(&[30, 29, 28, 27, 26, 25], false).unwrap();
        assert_eq!(array.remove_index(3), Ok(27));
        assert_eq!(array.to_vec(), vec![30, 29, 28, 26, 25]);
    }

    #[test]
    fn terminator_cannot_be_removed() {
        let mut array = DynArray::<u16>::new(true, false).unwrap();
        array.push(1).unwrap();
        assert_eq!(
            array.remove_index(1),
            Err(ArrayError::OutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn remove_index_fast_returns_removed_value() {
        let mut array = DynArray::from_slice(&[1u8, 2, 3, 4], true).unwrap();
        assert_eq!(array.remove_index_fast(0), Ok(1));
        assert_eq!(array.to_vec(), vec![4, 2, 3]);
        assert_eq!(array.get(3), Ok(0));
    }

    #[test]
    fn insert_and_prepend() {
        let mut array = DynArray::<i64>::new(false, false).unwrap();
        array.push(3).unwrap();
        array.insert(0, 1).unwrap();
        array.insert_slice(1, &[2]).unwrap();
        array.prepend_slice(&[-1, 0]).unwrap();
        assert_eq!(array.to_vec(), vec![-1, 0, 1, 2, 3]);
    }

    #[test]
    fn set_overwrites_value() {
        let mut array = DynArray::from_slice(&[1.0f32, 2.0], false).unwrap();
        array.set(1, 5.5).unwrap();
        assert_eq!(array.to_vec(), vec![1.0, 5.5]);
        assert!(array.set(2, 0.0).is_err());
    }

    #[test]
    fn pop_drains_in_reverse() {
        let mut array = DynArray::from_slice(&[1u32, 2, 3], true).unwrap();
        assert_eq!(array.pop(), Some(3));
        assert_eq!(array.pop(), Some(2));
        assert_eq!(array.pop(), Some(1));
        assert_eq!(array.pop(), None);
        assert_eq!(array.get(0), Ok(0));
    }

    #[test]
    fn byte_array_elements() {
        let mut array = DynArray::<[u8; 3]>::new(true, true).unwrap();
        array.push([1, 2, 3]).unwrap();
        assert_eq!(array.get(0), Ok([1, 2, 3]));
        assert_eq!(array.get(1), Ok([0, 0, 0]));
    }

    #[test]
    fn mismatched_config_is_rejected() {
        let result = DynArray::<u32>::with_config(ArrayConfig::new(8));
        assert!(matches!(result, Err(ArrayError::InvalidArgument { .. })));
        let raw = ByteArray::new(2, false, false).unwrap();
        assert!(DynArray::<u32>::from_raw(raw).is_err());
    }

    #[test]
    fn from_raw_shares_contents() {
        let mut raw = ByteArray::new(4, false, false).unwrap();
        raw.append_one(&9u32.to_ne_bytes()).unwrap();
        let array = DynArray::<u32>::from_raw(raw).unwrap();
        assert_eq!(array.to_vec(), vec![9]);
        assert_eq!(array.into_raw().len(), 1);
    }

    #[test]
    fn debug_lists_values() {
        let array = DynArray::from_slice(&[1i8, -2], false).unwrap();
        assert_eq!(format!("{array:?}"), "[1, -2]");
    }

    #[test]
    fn keep_release_hands_out_bytes() {
        let array = DynArray::from_slice(&[7u16], true).unwrap();
        let bytes = array.free(Release::Keep).unwrap();
        let mut expected = 7u16.to_ne_bytes().to_vec();
        expected.extend_from_slice(&[0, 0]);
        assert_eq!(bytes, expected);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(i32),
            Insert(usize, i32),
            Remove(usize),
            RemoveFast(usize),
            RemoveRange(usize, usize),
            SetLen(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<i32>().prop_map(Op::Push),
                (0usize..40, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
                (0usize..40).prop_map(Op::Remove),
                (0usize..40).prop_map(Op::RemoveFast),
                (0usize..40, 0usize..5).prop_map(|(i, n)| Op::RemoveRange(i, n)),
                (0usize..40).prop_map(Op::SetLen),
            ]
        }

        /// Apply `op` to the model, returning whether it should succeed.
        fn apply_model(model: &mut Vec<i32>, op: &Op) -> bool {
            match *op {
                Op::Push(v) => {
                    model.push(v);
                    true
                }
                Op::Insert(i, v) if i <= model.len() => {
                    model.insert(i, v);
                    true
                }
                Op::Remove(i) if i < model.len() => {
                    model.remove(i);
                    true
                }
                Op::RemoveFast(i) if i < model.len() => {
                    model.swap_remove(i);
                    true
                }
                Op::RemoveRange(i, n) if i + n <= model.len() => {
                    model.drain(i..i + n);
                    true
                }
                Op::SetLen(n) => {
                    model.resize(n, 0);
                    true
                }
                _ => false,
            }
        }

        fn apply_array(array: &mut DynArray<i32>, op: &Op) -> bool {
            match *op {
                Op::Push(v) => array.push(v).is_ok(),
                Op::Insert(i, v) => array.insert(i, v).is_ok(),
                Op::Remove(i) => array.remove_index(i).is_ok(),
                Op::RemoveFast(i) => array.remove_index_fast(i).is_ok(),
                Op::RemoveRange(i, n) => array.remove_range(i, n).is_ok(),
                Op::SetLen(n) => array.set_len(n).is_ok(),
            }
        }

        proptest! {
            #[test]
            fn matches_vec_model(
                ops in proptest::collection::vec(op(), 0..60),
            ) {
                // clear_on_alloc makes SetLen growth deterministic (zeroes).
                let mut array = DynArray::<i32>::new(true, true).unwrap();
                let mut model = Vec::new();
                for op in &ops {
                    let expected = apply_model(&mut model, op);
                    prop_assert_eq!(apply_array(&mut array, op), expected, "op {:?}", op);
                    prop_assert_eq!(array.to_vec(), model.clone());
                    prop_assert_eq!(array.get(array.len()), Ok(0));
                    prop_assert!(array.capacity() >= array.len());
                }
            }

            #[test]
            fn out_of_range_reads_fail(
                values in proptest::collection::vec(any::<i32>(), 0..10),
                past in 1usize..10,
            ) {
                let array = DynArray::from_slice(&values, false).unwrap();
                let index = values.len() + past - 1;
                prop_assert_eq!(
                    array.get(index),
                    Err(ArrayError::OutOfBounds { index, len: values.len() })
                );
            }
        }
    }
}
