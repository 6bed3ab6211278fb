// ndops/core/ops/src/list/stack.rs

use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{OpDescriptor, OpError};
use ndops_tensor::TensorList;

/// Joins every element of the input list along a new leading axis
pub struct StackList {
    descriptor: OpDescriptor,
}

impl StackList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("stack_list", 1, 1).list_op(),
        }
    }
}

impl Default for StackList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for StackList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let stacked = ctx.input_list(0)?.stack()?;
        ctx.set_output(0, stacked);
        Ok(())
    }
}

/// Splits the input array along axis 0 into a list
pub struct UnstackList {
    descriptor: OpDescriptor,
}

impl UnstackList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("unstack_list", 1, 1).list_op(),
        }
    }
}

impl Default for UnstackList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for UnstackList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let list = TensorList::unstack(ctx.input_array(0)?)?;
        ctx.set_output(0, list);
        Ok(())
    }
}
