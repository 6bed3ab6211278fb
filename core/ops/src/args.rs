// ndops/core/ops/src/args.rs

// Index argument resolution for list operations
use crate::context::OpContext;
use crate::types::OpError;
use ndops_tensor::NDArray;
use std::sync::Arc;
use tracing::warn;

/// Where the index set of a list operation comes from.
///
/// Resolved once per invocation, before any list access.
#[derive(Debug, Clone)]
pub enum IndexSource {
    /// Elements of a vector-shaped input tensor
    Tensor(Arc<NDArray>),
    /// Integer arguments supplied with the operation
    Literal(Vec<i64>),
    None,
}

impl IndexSource {
    /// The input at `position` wins when it is a vector; integer arguments
    /// are used otherwise.
    pub fn resolve(ctx: &OpContext, position: usize) -> Self {
        if ctx.width() > position {
            if let Ok(array) = ctx.input_array(position) {
                if array.is_vector() {
                    return IndexSource::Tensor(array.clone());
                }
            }
        }
        if !ctx.i_args().is_empty() {
            return IndexSource::Literal(ctx.i_args().to_vec());
        }
        IndexSource::None
    }

    pub fn kind(&self) -> &'static str {
        match self {
            IndexSource::Tensor(_) => "tensor",
            IndexSource::Literal(_) => "literal",
            IndexSource::None => "none",
        }
    }

    /// Requested indices in order, before bounds checking
    pub fn indices(&self) -> Result<Vec<i64>, OpError> {
        match self {
            IndexSource::Tensor(array) => array
                .to_vec::<i64>()
                .map_err(|e| OpError::BadArguments(format!("Unusable index tensor: {}", e))),
            IndexSource::Literal(values) => Ok(values.clone()),
            IndexSource::None => Err(OpError::BadArguments(
                "No index source: expected an index vector input or integer arguments".to_string(),
            )),
        }
    }
}

/// Single index from a non-empty input at `position`, else the first integer argument
pub fn single_index(ctx: &OpContext, position: usize) -> Result<i64, OpError> {
    if ctx.width() > position {
        let array = ctx.input_array(position)?;
        if !array.is_empty() {
            return array
                .e::<i64>(0)
                .map_err(|e| OpError::BadArguments(format!("Unusable index tensor: {}", e)));
        }
    }
    ctx.i_args().first().copied().ok_or_else(|| {
        OpError::BadArguments(
            "No index source: expected an index input or an integer argument".to_string(),
        )
    })
}

/// Check `index` against `[0, height)` and convert it to a position
pub fn checked_index(index: i64, height: usize) -> Result<usize, OpError> {
    match usize::try_from(index) {
        Ok(position) if position < height => Ok(position),
        _ => {
            warn!(
                index,
                height, "Requested index is out of range for list height"
            );
            Err(OpError::IndexOutOfBounds { index, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndops_tensor::TensorList;

    #[test]
    fn test_tensor_source_wins_over_literals() {
        let ctx = OpContext::new(1)
            .with_list(TensorList::new())
            .with_array(NDArray::vector(vec![2i64, 0]))
            .with_i_args(vec![1]);

        let source = IndexSource::resolve(&ctx, 1);
        assert!(matches!(source, IndexSource::Tensor(_)));
        assert_eq!(source.indices().unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_non_vector_input_falls_back_to_literals() {
        let ctx = OpContext::new(1)
            .with_list(TensorList::new())
            .with_array(NDArray::scalar(4i64))
            .with_i_args(vec![1, 1]);

        let source = IndexSource::resolve(&ctx, 1);
        assert!(matches!(source, IndexSource::Literal(_)));
        assert_eq!(source.indices().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_no_source() {
        let ctx = OpContext::new(1).with_list(TensorList::new());
        let source = IndexSource::resolve(&ctx, 1);
        assert!(matches!(source, IndexSource::None));
        assert!(matches!(source.indices(), Err(OpError::BadArguments(_))));
    }

    #[test]
    fn test_float_index_tensor_truncates() {
        let source = IndexSource::Tensor(Arc::new(NDArray::vector(vec![1.7f32, 0.2])));
        assert_eq!(source.indices().unwrap(), vec![1, 0]);

        let bad = IndexSource::Tensor(Arc::new(NDArray::vector(vec![f32::NAN])));
        assert!(matches!(bad.indices(), Err(OpError::BadArguments(_))));
    }

    #[test]
    fn test_single_index() {
        let from_input = OpContext::new(1)
            .with_list(TensorList::new())
            .with_array(NDArray::scalar(3i32))
            .with_i_args(vec![9]);
        assert_eq!(single_index(&from_input, 1).unwrap(), 3);

        let from_args = OpContext::new(1)
            .with_list(TensorList::new())
            .with_i_args(vec![9]);
        assert_eq!(single_index(&from_args, 1).unwrap(), 9);

        let neither = OpContext::new(1).with_list(TensorList::new());
        assert!(single_index(&neither, 1).is_err());
    }

    #[test]
    fn test_checked_index() {
        assert_eq!(checked_index(0, 2).unwrap(), 0);
        assert_eq!(checked_index(1, 2).unwrap(), 1);
        assert_eq!(
            checked_index(2, 2).unwrap_err(),
            OpError::IndexOutOfBounds { index: 2, height: 2 }
        );
        assert_eq!(
            checked_index(-1, 2).unwrap_err(),
            OpError::IndexOutOfBounds { index: -1, height: 2 }
        );
    }
}
