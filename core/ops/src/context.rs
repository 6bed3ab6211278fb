// ndops/core/ops/src/context.rs

// Execution context handed to every operation: positional inputs,
// literal arguments and output slots
use crate::types::OpError;
use ndops_tensor::{NDArray, TensorList};
use std::sync::Arc;

/// Device a kernel runs on
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Device {
    #[default]
    Cpu,
}

/// Handle describing where and how a kernel executes
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    device: Device,
}

impl LaunchContext {
    pub fn cpu() -> Self {
        Self {
            device: Device::Cpu,
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }
}

/// Positional value flowing through the graph
#[derive(Debug, Clone)]
pub enum Variable {
    Array(Arc<NDArray>),
    List(TensorList),
}

impl Variable {
    pub fn kind(&self) -> &'static str {
        match self {
            Variable::Array(_) => "array",
            Variable::List(_) => "list",
        }
    }

    pub fn as_array(&self) -> Option<&Arc<NDArray>> {
        match self {
            Variable::Array(array) => Some(array),
            Variable::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&TensorList> {
        match self {
            Variable::List(list) => Some(list),
            Variable::Array(_) => None,
        }
    }
}

impl From<NDArray> for Variable {
    fn from(array: NDArray) -> Self {
        Variable::Array(Arc::new(array))
    }
}

impl From<Arc<NDArray>> for Variable {
    fn from(array: Arc<NDArray>) -> Self {
        Variable::Array(array)
    }
}

impl From<TensorList> for Variable {
    fn from(list: TensorList) -> Self {
        Variable::List(list)
    }
}

/// Arguments and results of a single operation invocation
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    node_id: u64,
    launch: LaunchContext,
    inputs: Vec<Variable>,
    i_args: Vec<i64>,
    t_args: Vec<f64>,
    output_buffer: Option<NDArray>,
    outputs: Vec<Option<Variable>>,
}

impl OpContext {
    pub fn new(node_id: u64) -> Self {
        Self {
            node_id,
            ..Self::default()
        }
    }

    pub fn with_launch_context(mut self, launch: LaunchContext) -> Self {
        self.launch = launch;
        self
    }

    pub fn with_input(mut self, input: impl Into<Variable>) -> Self {
        self.inputs.push(input.into());
        self
    }

    pub fn with_array(self, array: NDArray) -> Self {
        self.with_input(array)
    }

    pub fn with_list(self, list: TensorList) -> Self {
        self.with_input(list)
    }

    pub fn with_i_args(mut self, i_args: Vec<i64>) -> Self {
        self.i_args = i_args;
        self
    }

    pub fn with_t_args(mut self, t_args: Vec<f64>) -> Self {
        self.t_args = t_args;
        self
    }

    /// Caller-allocated buffer the operation writes into instead of allocating
    pub fn with_output_buffer(mut self, buffer: NDArray) -> Self {
        self.output_buffer = Some(buffer);
        self
    }

    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    pub fn launch_context(&self) -> &LaunchContext {
        &self.launch
    }

    /// Number of positional inputs
    pub fn width(&self) -> usize {
        self.inputs.len()
    }

    pub fn i_args(&self) -> &[i64] {
        &self.i_args
    }

    pub fn t_args(&self) -> &[f64] {
        &self.t_args
    }

    pub fn input(&self, index: usize) -> Result<&Variable, OpError> {
        self.inputs.get(index).ok_or(OpError::MissingInput(index))
    }

    pub fn input_array(&self, index: usize) -> Result<&Arc<NDArray>, OpError> {
        let input = self.input(index)?;
        input.as_array().ok_or(OpError::WrongInputKind {
            index,
            expected: "array",
            actual: input.kind(),
        })
    }

    pub fn input_list(&self, index: usize) -> Result<&TensorList, OpError> {
        let input = self.input(index)?;
        input.as_list().ok_or(OpError::WrongInputKind {
            index,
            expected: "list",
            actual: input.kind(),
        })
    }

    pub fn take_output_buffer(&mut self) -> Option<NDArray> {
        self.output_buffer.take()
    }

    /// Attach a result to output slot `index`
    pub fn set_output(&mut self, index: usize, value: impl Into<Variable>) {
        if self.outputs.len() <= index {
            self.outputs.resize(index + 1, None);
        }
        self.outputs[index] = Some(value.into());
    }

    pub fn output(&self, index: usize) -> Option<&Variable> {
        self.outputs.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn output_array(&self, index: usize) -> Option<&Arc<NDArray>> {
        self.output(index).and_then(Variable::as_array)
    }

    pub fn output_list(&self, index: usize) -> Option<&TensorList> {
        self.output(index).and_then(Variable::as_list)
    }

    pub fn take_output(&mut self, index: usize) -> Option<Variable> {
        self.outputs.get_mut(index).and_then(|slot| slot.take())
    }

    /// Number of attached outputs
    pub fn output_count(&self) -> usize {
        self.outputs.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn clear_outputs(&mut self) {
        self.outputs.clear();
    }
}
