// ndops/core/ops/src/config.rs

use crate::types::OpError;
use ndops_tensor::DataType;
use serde::{Deserialize, Serialize};

/// Operation library configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpsConfig {
    /// Reject a caller-supplied `range` output that is not C-contiguous
    /// instead of filling it in logical order
    #[serde(default = "default_strict_layout")]
    pub strict_layout: bool,

    /// Output type of `range` when driven by integer arguments
    #[serde(default = "default_range_dtype")]
    pub default_range_dtype: DataType,

    /// Output type of `range` when driven by floating arguments
    #[serde(default = "default_float_range_dtype")]
    pub float_range_dtype: DataType,

    /// Upper bound on the length of a generated range
    #[serde(default = "default_max_range_length")]
    pub max_range_length: usize,
}

fn default_strict_layout() -> bool {
    true
}

fn default_range_dtype() -> DataType {
    DataType::Int64
}

fn default_float_range_dtype() -> DataType {
    DataType::Float32
}

fn default_max_range_length() -> usize {
    1 << 28
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            strict_layout: default_strict_layout(),
            default_range_dtype: default_range_dtype(),
            float_range_dtype: default_float_range_dtype(),
            max_range_length: default_max_range_length(),
        }
    }
}

impl OpsConfig {
    pub fn validate(&self) -> Result<(), OpError> {
        if self.max_range_length == 0 {
            return Err(OpError::InvalidConfig(
                "max_range_length must be greater than zero".to_string(),
            ));
        }
        if !self.float_range_dtype.is_float() {
            return Err(OpError::InvalidConfig(format!(
                "float_range_dtype must be a floating type, got {}",
                self.float_range_dtype
            )));
        }
        Ok(())
    }
}
