// ndops/core/ops/src/generic/mod.rs

// Operations that do not work on tensor lists
pub mod range;

pub use range::RangeOp;
