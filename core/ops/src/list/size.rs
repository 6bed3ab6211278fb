// ndops/core/ops/src/list/size.rs

use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{OpDescriptor, OpError};
use ndops_tensor::NDArray;

/// Height of the input list as an int64 scalar
pub struct SizeList {
    descriptor: OpDescriptor,
}

impl SizeList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("size_list", 1, 1).list_op(),
        }
    }
}

impl Default for SizeList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for SizeList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let height = ctx.input_list(0)?.height();
        ctx.set_output(0, NDArray::scalar(height as i64));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use ndops_tensor::TensorList;

    #[test]
    fn test_size_list() {
        let list = TensorList::from_arrays(vec![NDArray::scalar(1.0f32), NDArray::scalar(2.0f32)]);
        let mut ctx = OpContext::new(1).with_list(list);
        assert_eq!(SizeList::new().execute(&mut ctx), Status::Ok);

        let size = ctx.output_array(0).unwrap();
        assert!(size.is_scalar());
        assert_eq!(size.e::<i64>(0).unwrap(), 2);
    }
}
