// ndops/core/ops/src/helpers/mod.rs

// Kernels invoked by operations once their arguments are validated
pub mod range;

pub use range::{range, SequenceElement};
