// ndops/core/tensor/src/array.rs

// Typed N-dimensional buffer backed by ndarray
use crate::types::{DataType, Order, TensorError};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};
use num_traits::NumCast;

/// Storage of an `NDArray`, one variant per supported element type
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
}

/// Expands `$body` once per storage variant with `$a` bound to the typed array
macro_rules! dispatch {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::Float32($a) => $body,
            ArrayData::Float64($a) => $body,
            ArrayData::Int32($a) => $body,
            ArrayData::Int64($a) => $body,
        }
    };
}

/// Rust element types an `NDArray` can hold
pub trait Element:
    Copy + Send + Sync + PartialEq + std::fmt::Debug + NumCast + 'static
{
    const DTYPE: DataType;

    fn wrap(array: ArrayD<Self>) -> ArrayData;
    fn unwrap_ref(data: &ArrayData) -> Option<&ArrayD<Self>>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const DTYPE: DataType = DataType::$variant;

            fn wrap(array: ArrayD<Self>) -> ArrayData {
                ArrayData::$variant(array)
            }

            fn unwrap_ref(data: &ArrayData) -> Option<&ArrayD<Self>> {
                match data {
                    ArrayData::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(f32, Float32);
impl_element!(f64, Float64);
impl_element!(i32, Int32);
impl_element!(i64, Int64);

/// Shaped, strided, typed block of numeric memory
#[derive(Debug, Clone, PartialEq)]
pub struct NDArray {
    data: ArrayData,
}

impl NDArray {
    pub fn from_array<T: Element>(array: ArrayD<T>) -> Self {
        Self {
            data: T::wrap(array),
        }
    }

    /// Build a row-major array from a flat buffer
    pub fn from_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        let actual = data.len();
        let array = ArrayD::from_shape_vec(IxDyn(shape), data).map_err(|_| {
            TensorError::ShapeMismatch {
                shape: shape.to_vec(),
                expected,
                actual,
            }
        })?;
        Ok(Self::from_array(array))
    }

    /// Rank-0 array holding a single value
    pub fn scalar<T: Element>(value: T) -> Self {
        Self::from_array(ArrayD::from_elem(IxDyn(&[]), value))
    }

    /// Rank-1 array
    pub fn vector<T: Element>(data: Vec<T>) -> Self {
        Self::from_array(ndarray::Array1::from(data).into_dyn())
    }

    pub fn zeros(shape: &[usize], dtype: DataType) -> Self {
        let dim = IxDyn(shape);
        let data = match dtype {
            DataType::Float32 => ArrayData::Float32(ArrayD::zeros(dim)),
            DataType::Float64 => ArrayData::Float64(ArrayD::zeros(dim)),
            DataType::Int32 => ArrayData::Int32(ArrayD::zeros(dim)),
            DataType::Int64 => ArrayData::Int64(ArrayD::zeros(dim)),
        };
        Self { data }
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayData {
        &mut self.data
    }

    pub fn dtype(&self) -> DataType {
        match &self.data {
            ArrayData::Float32(_) => DataType::Float32,
            ArrayData::Float64(_) => DataType::Float64,
            ArrayData::Int32(_) => DataType::Int32,
            ArrayData::Int64(_) => DataType::Int64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(&self.data, a => a.shape())
    }

    /// Strides in elements
    pub fn strides(&self) -> &[isize] {
        dispatch!(&self.data, a => a.strides())
    }

    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        dispatch!(&self.data, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        self.rank() == 0
    }

    /// Rank 1, or rank 2 with a unit dimension; never empty
    pub fn is_vector(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let shape = self.shape();
        match shape.len() {
            1 => true,
            2 => shape[0] == 1 || shape[1] == 1,
            _ => false,
        }
    }

    pub fn order(&self) -> Order {
        dispatch!(&self.data, a => {
            if a.is_standard_layout() {
                Order::C
            } else if a.t().is_standard_layout() {
                Order::F
            } else {
                Order::Strided
            }
        })
    }

    /// Element-wise stride: `Some(1)` for a C-contiguous buffer
    pub fn ews(&self) -> Option<usize> {
        match self.order() {
            Order::C => Some(1),
            _ => None,
        }
    }

    /// Element at logical row-major position `index`, converted to `T`
    pub fn e<T: NumCast>(&self, index: usize) -> Result<T, TensorError> {
        let len = self.len();
        if index >= len {
            return Err(TensorError::IndexOutOfBounds { index, len });
        }
        dispatch!(&self.data, a => element_at(a, index))
    }

    /// All elements in logical row-major order, converted to `T`
    pub fn to_vec<T: NumCast>(&self) -> Result<Vec<T>, TensorError> {
        dispatch!(&self.data, a => {
            a.iter()
                .enumerate()
                .map(|(index, v)| convert(*v, index))
                .collect()
        })
    }

    pub fn typed<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::unwrap_ref(&self.data)
    }

    /// Reverse the axes without moving data (C order becomes F order)
    pub fn transposed(&self) -> Self {
        dispatch!(&self.data, a => NDArray::from_array(a.clone().reversed_axes()))
    }

    /// Reorder the axes without moving data
    pub fn permuted(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        let valid = axes.len() == rank
            && axes.iter().all(|&axis| {
                axis < rank && !std::mem::replace(&mut seen[axis], true)
            });
        if !valid {
            return Err(TensorError::InvalidAxes {
                axes: axes.to_vec(),
                rank,
            });
        }
        Ok(dispatch!(&self.data, a => NDArray::from_array(a.clone().permuted_axes(IxDyn(axes)))))
    }

    /// Sub-arrays along axis 0
    pub fn outer(&self) -> Result<Vec<NDArray>, TensorError> {
        if self.is_scalar() {
            return Err(TensorError::ScalarUnstack);
        }
        let parts: Vec<NDArray> = dispatch!(&self.data, a => {
            a.outer_iter()
                .map(|view| NDArray::from_array(view.to_owned()))
                .collect()
        });
        Ok(parts)
    }

    /// Join equally shaped arrays along a new leading axis
    pub fn stack(arrays: &[&NDArray]) -> Result<NDArray, TensorError> {
        let first = arrays.first().ok_or(TensorError::EmptyList)?;
        for array in arrays.iter().skip(1) {
            if array.dtype() != first.dtype() {
                return Err(TensorError::DataTypeMismatch {
                    expected: first.dtype(),
                    actual: array.dtype(),
                });
            }
            if array.shape() != first.shape() {
                return Err(TensorError::ShapeMismatch {
                    shape: first.shape().to_vec(),
                    expected: first.len(),
                    actual: array.len(),
                });
            }
        }
        match first.dtype() {
            DataType::Float32 => stack_typed::<f32>(arrays),
            DataType::Float64 => stack_typed::<f64>(arrays),
            DataType::Int32 => stack_typed::<i32>(arrays),
            DataType::Int64 => stack_typed::<i64>(arrays),
        }
    }
}

fn convert<S: Element, T: NumCast>(value: S, index: usize) -> Result<T, TensorError> {
    <T as NumCast>::from(value).ok_or(TensorError::Conversion {
        index,
        target: std::any::type_name::<T>(),
    })
}

fn element_at<S: Element, T: NumCast>(array: &ArrayD<S>, index: usize) -> Result<T, TensorError> {
    let value = match array.as_slice() {
        Some(slice) => slice.get(index).copied(),
        None => array.iter().nth(index).copied(),
    };
    let value = value.ok_or(TensorError::IndexOutOfBounds {
        index,
        len: array.len(),
    })?;
    convert(value, index)
}

fn stack_typed<T: Element>(arrays: &[&NDArray]) -> Result<NDArray, TensorError> {
    let views: Vec<ArrayViewD<'_, T>> = arrays
        .iter()
        .map(|array| {
            array.typed::<T>().map(|a| a.view()).ok_or(TensorError::DataTypeMismatch {
                expected: T::DTYPE,
                actual: array.dtype(),
            })
        })
        .collect::<Result<_, _>>()?;
    let stacked = ndarray::stack(Axis(0), &views).map_err(|_| TensorError::ShapeMismatch {
        shape: arrays[0].shape().to_vec(),
        expected: arrays[0].len(),
        actual: arrays.iter().map(|a| a.len()).sum(),
    })?;
    Ok(NDArray::from_array(stacked))
}
