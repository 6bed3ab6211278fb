// ndops/core/ops/src/types.rs

// Status codes, errors and operation descriptors
use crate::context::OpContext;
use ndops_tensor::TensorError;
use thiserror::Error;

/// Outcome reported to the graph executor
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Status {
    Ok,
    BadArguments,
    BadInput,
    ValidationError,
    KernelFailure,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::BadArguments => "bad_arguments",
            Status::BadInput => "bad_input",
            Status::ValidationError => "validation_error",
            Status::KernelFailure => "kernel_failure",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpError {
    #[error("Bad arguments: {0}")]
    BadArguments(String),

    #[error("Requested index [{index}] is out of range for list height [{height}]")]
    IndexOutOfBounds { index: i64, height: usize },

    #[error("Missing input {0}")]
    MissingInput(usize),

    #[error("Input {index} is a {actual}, expected a {expected}")]
    WrongInputKind {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Unknown operation: {0}")]
    UnknownOp(String),

    #[error("Operation already registered: {0}")]
    DuplicateOp(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tensor error: {0}")]
    Tensor(#[from] TensorError),
}

impl OpError {
    /// Status code the framework sees for this error
    pub fn status(&self) -> Status {
        match self {
            OpError::BadArguments(_) | OpError::IndexOutOfBounds { .. } => Status::BadArguments,
            OpError::MissingInput(_) | OpError::WrongInputKind { .. } => Status::BadInput,
            OpError::UnknownOp(_) | OpError::DuplicateOp(_) | OpError::InvalidConfig(_) => {
                Status::ValidationError
            }
            OpError::Tensor(TensorError::IndexOutOfBounds { .. }) => Status::BadArguments,
            OpError::Tensor(_) => Status::KernelFailure,
        }
    }
}

/// Number of literal arguments an operation takes
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArgCount {
    /// At least this many
    Required(usize),
    /// Any number, including none
    Variable,
}

impl ArgCount {
    fn satisfied_by(&self, supplied: usize) -> bool {
        match self {
            ArgCount::Required(required) => supplied >= *required,
            ArgCount::Variable => true,
        }
    }
}

impl std::fmt::Display for ArgCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgCount::Required(n) => write!(f, "{}", n),
            ArgCount::Variable => f.write_str("var"),
        }
    }
}

/// Static signature of a declarable operation
#[derive(Debug, Clone, PartialEq)]
pub struct OpDescriptor {
    pub name: &'static str,
    /// Required positional inputs
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub t_args: ArgCount,
    pub i_args: ArgCount,
    /// Consumes or produces a tensor list
    pub is_list_op: bool,
}

impl OpDescriptor {
    pub const fn new(name: &'static str, num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            name,
            num_inputs,
            num_outputs,
            t_args: ArgCount::Required(0),
            i_args: ArgCount::Required(0),
            is_list_op: false,
        }
    }

    pub fn with_t_args(mut self, t_args: ArgCount) -> Self {
        self.t_args = t_args;
        self
    }

    pub fn with_i_args(mut self, i_args: ArgCount) -> Self {
        self.i_args = i_args;
        self
    }

    pub fn list_op(mut self) -> Self {
        self.is_list_op = true;
        self
    }

    /// Reject a context that cannot satisfy this signature
    pub fn check_arguments(&self, ctx: &OpContext) -> Result<(), OpError> {
        if ctx.width() < self.num_inputs {
            return Err(OpError::MissingInput(ctx.width()));
        }
        if !self.i_args.satisfied_by(ctx.i_args().len()) {
            return Err(OpError::BadArguments(format!(
                "{} requires {} integer argument(s), got {}",
                self.name,
                self.i_args,
                ctx.i_args().len()
            )));
        }
        if !self.t_args.satisfied_by(ctx.t_args().len()) {
            return Err(OpError::BadArguments(format!(
                "{} requires {} floating argument(s), got {}",
                self.name,
                self.t_args,
                ctx.t_args().len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndops_tensor::NDArray;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            OpError::BadArguments("x".into()).status(),
            Status::BadArguments
        );
        assert_eq!(
            OpError::IndexOutOfBounds { index: 5, height: 2 }.status(),
            Status::BadArguments
        );
        assert_eq!(OpError::MissingInput(0).status(), Status::BadInput);
        assert_eq!(OpError::UnknownOp("x".into()).status(), Status::ValidationError);
        assert_eq!(
            OpError::from(TensorError::EmptyList).status(),
            Status::KernelFailure
        );
    }

    #[test]
    fn test_out_of_bounds_message_names_index_and_height() {
        let message = OpError::IndexOutOfBounds { index: 5, height: 2 }.to_string();
        assert!(message.contains("[5]"));
        assert!(message.contains("[2]"));
    }

    #[test]
    fn test_descriptor_argument_checks() {
        let descriptor = OpDescriptor::new("sample_op", 1, 1).with_i_args(ArgCount::Required(2));

        let empty = OpContext::new(1);
        assert_eq!(
            descriptor.check_arguments(&empty),
            Err(OpError::MissingInput(0))
        );

        let short = OpContext::new(2)
            .with_array(NDArray::scalar(1i64))
            .with_i_args(vec![1]);
        assert!(descriptor.check_arguments(&short).is_err());

        let ok = OpContext::new(3)
            .with_array(NDArray::scalar(1i64))
            .with_i_args(vec![1, 2]);
        assert!(descriptor.check_arguments(&ok).is_ok());
    }
}
