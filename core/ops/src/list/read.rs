// ndops/core/ops/src/list/read.rs

use crate::args::{checked_index, single_index};
use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{ArgCount, OpDescriptor, OpError};

/// Inputs: list, optional index scalar. Integer argument: index.
pub struct ReadList {
    descriptor: OpDescriptor,
}

impl ReadList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("read_list", 1, 1)
                .with_i_args(ArgCount::Variable)
                .list_op(),
        }
    }
}

impl Default for ReadList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for ReadList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let list = ctx.input_list(0)?;
        let index = checked_index(single_index(ctx, 1)?, list.height())?;
        let array = list.read(index)?;
        ctx.set_output(0, array);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use ndops_tensor::{NDArray, TensorList};
    use std::sync::Arc;

    #[test]
    fn test_read_shares_buffer() {
        let list = TensorList::from_arrays(vec![NDArray::scalar(1i32), NDArray::scalar(2i32)]);
        let mut ctx = OpContext::new(1)
            .with_list(list.clone())
            .with_array(NDArray::scalar(1i64));
        assert_eq!(ReadList::new().execute(&mut ctx), Status::Ok);
        assert!(Arc::ptr_eq(
            ctx.output_array(0).unwrap(),
            &list.read(1).unwrap()
        ));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let list = TensorList::from_arrays(vec![NDArray::scalar(1i32)]);
        let mut ctx = OpContext::new(1).with_list(list).with_i_args(vec![1]);
        assert_eq!(ReadList::new().execute(&mut ctx), Status::BadArguments);
        assert!(ctx.output(0).is_none());
    }
}
