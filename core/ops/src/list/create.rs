// ndops/core/ops/src/list/create.rs

use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{ArgCount, OpDescriptor, OpError};
use ndops_tensor::TensorList;

/// Empty list. Optional integer argument: expected size.
pub struct CreateList {
    descriptor: OpDescriptor,
}

impl CreateList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("create_list", 0, 1)
                .with_i_args(ArgCount::Variable)
                .list_op(),
        }
    }
}

impl Default for CreateList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for CreateList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let list = match ctx.i_args().first() {
            Some(&size) => {
                let size = usize::try_from(size).map_err(|_| {
                    OpError::BadArguments(format!("Expected list size must be >= 0, got {}", size))
                })?;
                TensorList::with_expected_size(size)
            }
            None => TensorList::new(),
        };
        ctx.set_output(0, list.with_name(format!("list_{}", ctx.node_id())));
        Ok(())
    }
}
