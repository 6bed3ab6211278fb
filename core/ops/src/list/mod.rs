// ndops/core/ops/src/list/mod.rs

// Tensor list operations
pub mod create;
pub mod pick;
pub mod read;
pub mod size;
pub mod stack;
pub mod write;

pub use create::CreateList;
pub use pick::{pick, PickList};
pub use read::ReadList;
pub use size::SizeList;
pub use stack::{StackList, UnstackList};
pub use write::WriteList;
