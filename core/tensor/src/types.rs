// ndops/core/tensor/src/types.rs

// Element types, layout metadata and errors shared by arrays and lists
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Element type of a buffer
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Float32,
    Float64,
    Int32,
    Int64,
}

impl DataType {
    pub fn is_float(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
        }
    }

    /// Parse a type name, accepting the short aliases used on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "float32" | "f32" | "float" => Some(DataType::Float32),
            "float64" | "f64" | "double" => Some(DataType::Float64),
            "int32" | "i32" | "int" => Some(DataType::Int32),
            "int64" | "i64" | "long" => Some(DataType::Int64),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Memory order of a buffer
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Order {
    /// Row-major, contiguous
    C,
    /// Column-major, contiguous
    F,
    /// Anything else (views with gaps, negative or broadcast strides)
    Strided,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("Shape mismatch: shape {shape:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Data type mismatch: expected {expected}, got {actual}")]
    DataTypeMismatch { expected: DataType, actual: DataType },

    #[error("Cannot convert element {index} to {target}")]
    Conversion { index: usize, target: &'static str },

    #[error("Invalid axes {axes:?} for rank {rank}")]
    InvalidAxes { axes: Vec<usize>, rank: usize },

    #[error("Cannot stack an empty list")]
    EmptyList,

    #[error("Cannot unstack a scalar")]
    ScalarUnstack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parsing() {
        assert_eq!(DataType::from_str("f32"), Some(DataType::Float32));
        assert_eq!(DataType::from_str("DOUBLE"), Some(DataType::Float64));
        assert_eq!(DataType::from_str("int"), Some(DataType::Int32));
        assert_eq!(DataType::from_str("int64"), Some(DataType::Int64));
        assert_eq!(DataType::from_str("bool"), None);
    }

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::Int64.to_string(), "int64");
        assert!(DataType::Float64.is_float());
        assert!(!DataType::Int32.is_float());
    }
}
