// ndops/core/tensor/src/list.rs

// Ordered, growable collection of shared arrays
use crate::array::NDArray;
use crate::types::{DataType, TensorError};
use std::sync::Arc;
use tracing::trace;

/// Ordered collection of arrays with a "height" (element count).
///
/// Elements are held as `Arc<NDArray>`: cloning the list, picking from it or
/// reading an element never copies buffer contents.
#[derive(Debug, Clone, Default)]
pub struct TensorList {
    name: String,
    elements: Vec<Arc<NDArray>>,
    dtype: Option<DataType>,
    expected_size: Option<usize>,
}

impl TensorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list that reserves room for `expected_size` elements
    pub fn with_expected_size(expected_size: usize) -> Self {
        Self {
            elements: Vec::with_capacity(expected_size),
            expected_size: Some(expected_size),
            ..Self::default()
        }
    }

    pub fn from_arrays(arrays: Vec<NDArray>) -> Self {
        Self::from_shared(arrays.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(elements: Vec<Arc<NDArray>>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restrict every future write to arrays of `dtype`
    pub fn with_dtype(mut self, dtype: DataType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Option<DataType> {
        self.dtype
    }

    pub fn expected_size(&self) -> Option<usize> {
        self.expected_size
    }

    pub fn height(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Arc<NDArray>] {
        &self.elements
    }

    pub fn read(&self, index: usize) -> Result<Arc<NDArray>, TensorError> {
        self.elements
            .get(index)
            .cloned()
            .ok_or(TensorError::IndexOutOfBounds {
                index,
                len: self.height(),
            })
    }

    /// Overwrite the element at `index`, or append when `index == height`
    pub fn write(&mut self, index: usize, array: Arc<NDArray>) -> Result<(), TensorError> {
        if let Some(expected) = self.dtype {
            if array.dtype() != expected {
                return Err(TensorError::DataTypeMismatch {
                    expected,
                    actual: array.dtype(),
                });
            }
        }

        let height = self.height();
        if index < height {
            self.elements[index] = array;
        } else if index == height {
            self.elements.push(array);
        } else {
            return Err(TensorError::IndexOutOfBounds { index, len: height });
        }
        Ok(())
    }

    pub fn push(&mut self, array: Arc<NDArray>) -> Result<(), TensorError> {
        self.write(self.height(), array)
    }

    /// New list holding the elements at `indices`, in that order.
    ///
    /// Duplicates are allowed. The result shares buffers with `self`.
    pub fn pick(&self, indices: &[usize]) -> Result<TensorList, TensorError> {
        let elements = indices
            .iter()
            .map(|&index| self.read(index))
            .collect::<Result<Vec<_>, _>>()?;
        trace!(
            source = %self.name,
            height = self.height(),
            picked = elements.len(),
            "Picked sub-list"
        );
        Ok(TensorList {
            name: self.name.clone(),
            elements,
            dtype: self.dtype,
            expected_size: None,
        })
    }

    /// Join all elements along a new leading axis
    pub fn stack(&self) -> Result<NDArray, TensorError> {
        let arrays: Vec<&NDArray> = self.elements.iter().map(|a| a.as_ref()).collect();
        NDArray::stack(&arrays)
    }

    /// Split `array` along axis 0 into a new list
    pub fn unstack(array: &NDArray) -> Result<TensorList, TensorError> {
        let parts = array.outer()?;
        Ok(TensorList {
            expected_size: Some(parts.len()),
            dtype: Some(array.dtype()),
            ..Self::from_arrays(parts)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TensorList {
        TensorList::from_arrays(vec![
            NDArray::vector(vec![1.0f32, 2.0]),
            NDArray::vector(vec![3.0f32, 4.0]),
            NDArray::vector(vec![5.0f32, 6.0]),
        ])
        .with_name("sample")
    }

    #[test]
    fn test_pick_shares_buffers() {
        let list = sample_list();
        let picked = list.pick(&[2, 0, 2]).unwrap();

        assert_eq!(picked.height(), 3);
        assert!(Arc::ptr_eq(&picked.read(0).unwrap(), &list.read(2).unwrap()));
        assert!(Arc::ptr_eq(&picked.read(1).unwrap(), &list.read(0).unwrap()));
        assert!(Arc::ptr_eq(&picked.read(2).unwrap(), &list.read(2).unwrap()));
        assert_eq!(picked.name(), "sample");
        // source untouched
        assert_eq!(list.height(), 3);
    }

    #[test]
    fn test_pick_out_of_bounds() {
        let list = sample_list();
        assert_eq!(
            list.pick(&[0, 3]).unwrap_err(),
            TensorError::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert_eq!(list.pick(&[]).unwrap().height(), 0);
    }

    #[test]
    fn test_write_overwrites_and_appends() {
        let mut list = TensorList::with_expected_size(2).with_dtype(DataType::Int64);
        assert_eq!(list.expected_size(), Some(2));

        list.write(0, Arc::new(NDArray::scalar(1i64))).unwrap();
        list.push(Arc::new(NDArray::scalar(2i64))).unwrap();
        list.write(0, Arc::new(NDArray::scalar(7i64))).unwrap();
        assert_eq!(list.height(), 2);
        assert_eq!(list.read(0).unwrap().e::<i64>(0).unwrap(), 7);

        assert_eq!(
            list.write(5, Arc::new(NDArray::scalar(1i64))),
            Err(TensorError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert!(matches!(
            list.write(0, Arc::new(NDArray::scalar(1.0f64))),
            Err(TensorError::DataTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_stack_unstack() {
        let list = sample_list();
        let stacked = list.stack().unwrap();
        assert_eq!(stacked.shape(), &[3, 2]);

        let unstacked = TensorList::unstack(&stacked).unwrap();
        assert_eq!(unstacked.height(), 3);
        assert_eq!(unstacked.dtype(), Some(DataType::Float32));
        assert_eq!(*unstacked.read(1).unwrap(), NDArray::vector(vec![3.0f32, 4.0]));

        assert_eq!(TensorList::new().stack(), Err(TensorError::EmptyList));
    }

    mod pick_properties {
        use super::*;
        use proptest::prelude::*;

        fn indexed_list(height: usize) -> TensorList {
            TensorList::from_arrays((0..height as i64).map(NDArray::scalar).collect())
        }

        proptest! {
            #[test]
            fn picked_elements_alias_source(
                (height, indices) in (1usize..12).prop_flat_map(|height| {
                    (Just(height), prop::collection::vec(0..height, 0..20))
                })
            ) {
                let list = indexed_list(height);
                let picked = list.pick(&indices).unwrap();

                prop_assert_eq!(picked.height(), indices.len());
                prop_assert_eq!(list.height(), height);
                for (k, &index) in indices.iter().enumerate() {
                    let element = picked.read(k).unwrap();
                    prop_assert!(Arc::ptr_eq(&element, &list.read(index).unwrap()));
                    prop_assert_eq!(element.e::<i64>(0).unwrap(), index as i64);
                }
            }

            #[test]
            fn pick_past_height_fails(height in 0usize..12, overshoot in 0usize..4) {
                let list = indexed_list(height);
                let index = height + overshoot;
                prop_assert_eq!(
                    list.pick(&[index]).unwrap_err(),
                    TensorError::IndexOutOfBounds { index, len: height }
                );
            }
        }
    }
}
