// ndops/core/ops/src/list/pick.rs

// pick_list: new list from selected positions of an input list
use crate::args::{checked_index, IndexSource};
use crate::context::OpContext;
use crate::registry::DeclarableOp;
use crate::types::{ArgCount, OpDescriptor, OpError};
use ndops_tensor::TensorList;
use tracing::debug;

/// Elements of `list` at the positions named by `source`, in order.
///
/// Every index is checked before the result is built, so a bad index
/// produces no partial list. Buffers are shared with `list`.
pub fn pick(list: &TensorList, source: &IndexSource) -> Result<TensorList, OpError> {
    let requested = source.indices()?;
    let height = list.height();
    let positions = requested
        .into_iter()
        .map(|index| checked_index(index, height))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(list.pick(&positions)?)
}

/// Inputs: list, optional index vector. Integer arguments: indices, used
/// when no index vector is given.
pub struct PickList {
    descriptor: OpDescriptor,
}

impl PickList {
    pub fn new() -> Self {
        Self {
            descriptor: OpDescriptor::new("pick_list", 1, 1)
                .with_i_args(ArgCount::Variable)
                .list_op(),
        }
    }
}

impl Default for PickList {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarableOp for PickList {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let source = IndexSource::resolve(ctx, 1);
        let list = ctx.input_list(0)?;
        let result = pick(list, &source)?;

        debug!(
            source = source.kind(),
            height = list.height(),
            picked = result.height(),
            "pick_list"
        );
        ctx.set_output(0, result);
        Ok(())
    }
}
