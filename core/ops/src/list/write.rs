// ndops/core/ops/src/list/write.rs

use crate::args::single_index;
use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{ArgCount, OpDescriptor, OpError};
use tracing::trace;

/// Inputs: list, array, optional index scalar. Integer argument: index.
///
/// Outputs a copy of the list (buffers shared) with the array written at
/// the index; the input list is left as it was.
pub struct WriteList {
    descriptor: OpDescriptor,
}

impl WriteList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("write_list", 2, 1)
                .with_i_args(ArgCount::Variable)
                .list_op(),
        }
    }
}

impl Default for WriteList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for WriteList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let index = single_index(ctx, 2)?;
        let mut list = ctx.input_list(0)?.clone();
        let array = ctx.input_array(1)?.clone();

        // Writing at `height` appends
        let position = usize::try_from(index)
            .ok()
            .filter(|&p| p <= list.height())
            .ok_or(OpError::IndexOutOfBounds {
                index,
                height: list.height(),
            })?;
        list.write(position, array)?;

        trace!(index = position, height = list.height(), "write_list");
        ctx.set_output(0, list);
        Ok(())
    }
}
