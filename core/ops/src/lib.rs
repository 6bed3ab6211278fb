// ndops/core/ops/src/lib.rs

// Re-export modules
pub mod args;
pub mod config;
pub mod context;
pub mod generic;
pub mod helpers;
pub mod list;
pub mod metrics;
pub mod registry;
pub mod types;

pub use args::IndexSource;
pub use config::OpsConfig;
pub use context::{Device, LaunchContext, OpContext, Variable};
pub use generic::RangeOp;
pub use list::{CreateList, PickList, ReadList, SizeList, StackList, UnstackList, WriteList};
pub use registry::{DeclarableOp, OpRegistry};
pub use types::{ArgCount, OpDescriptor, OpError, Status};

// Tensor types used in every signature
pub use ndops_tensor::{DataType, Element, NDArray, TensorError, TensorList};
