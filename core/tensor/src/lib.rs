// ndops/core/tensor/src/lib.rs

// Buffer abstraction and tensor list container
pub mod array;
pub mod list;
pub mod types;

pub use array::{ArrayData, Element, NDArray};
pub use list::TensorList;
pub use types::{DataType, Order, TensorError};
