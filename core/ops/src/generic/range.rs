// ndops/core/ops/src/generic/range.rs

// `range` operation: resolves start/limit/delta, sizes the output and
// delegates to the sequence generator
use crate::config::OpsConfig;
use crate::context::OpContext;
use crate::helpers;
use crate::registry::DeclarableOp;
use crate::types::{ArgCount, OpDescriptor, OpError};
use ndops_tensor::{DataType, NDArray};
use std::sync::Arc;
use tracing::debug;

/// Sequence bounds in the arithmetic they were supplied in
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds {
    Int { start: i64, limit: i64, delta: i64 },
    Float { start: f64, limit: f64, delta: f64 },
}

/// Split 1..=3 values into (start, limit, delta)
fn split<T: Copy>(values: &[T], zero: T, one: T) -> Result<(T, T, T), OpError> {
    match values {
        &[limit] => Ok((zero, limit, one)),
        &[start, limit] => Ok((start, limit, one)),
        &[start, limit, delta] => Ok((start, limit, delta)),
        _ => Err(OpError::BadArguments(format!(
            "range expects 1 to 3 parameters, got {}",
            values.len()
        ))),
    }
}

impl Bounds {
    fn int(values: &[i64]) -> Result<Self, OpError> {
        let (start, limit, delta) = split(values, 0, 1)?;
        Ok(Bounds::Int { start, limit, delta })
    }

    fn float(values: &[f64]) -> Result<Self, OpError> {
        let (start, limit, delta) = split(values, 0.0, 1.0)?;
        Ok(Bounds::Float { start, limit, delta })
    }

    /// Number of elements, `ceil((limit - start) / delta)`
    fn len(&self, max: usize) -> Result<usize, OpError> {
        let len = match *self {
            Bounds::Int { start, limit, delta } => {
                if delta == 0 {
                    return Err(OpError::BadArguments("range delta must not be zero".into()));
                }
                let diff = i128::from(limit) - i128::from(start);
                if diff == 0 {
                    return Ok(0);
                }
                if (diff > 0) != (delta > 0) {
                    return Err(OpError::BadArguments(format!(
                        "range (limit - start) / delta must be positive: start={}, limit={}, delta={}",
                        start, limit, delta
                    )));
                }
                let step = i128::from(delta).abs();
                let steps = (diff.abs() + step - 1) / step;
                usize::try_from(steps).unwrap_or(usize::MAX)
            }
            Bounds::Float { start, limit, delta } => {
                if !(start.is_finite() && limit.is_finite() && delta.is_finite()) {
                    return Err(OpError::BadArguments(format!(
                        "range parameters must be finite: start={}, limit={}, delta={}",
                        start, limit, delta
                    )));
                }
                if delta == 0.0 {
                    return Err(OpError::BadArguments("range delta must not be zero".into()));
                }
                if limit == start {
                    return Ok(0);
                }
                let steps = ((limit - start) / delta).ceil();
                if steps <= 0.0 {
                    return Err(OpError::BadArguments(format!(
                        "range (limit - start) / delta must be positive: start={}, limit={}, delta={}",
                        start, limit, delta
                    )));
                }
                if steps > max as f64 {
                    usize::MAX
                } else {
                    steps as usize
                }
            }
        };

        if len > max {
            return Err(OpError::BadArguments(format!(
                "range length exceeds the configured maximum of {}",
                max
            )));
        }
        Ok(len)
    }

    /// Reject bounds the output element type cannot hold exactly: start,
    /// delta and the last generated value must all convert without
    /// truncation or overflow. Floating outputs only need finite values.
    fn check_representable(&self, dtype: DataType, len: usize) -> Result<(), OpError> {
        if len == 0 {
            return Ok(());
        }
        let steps = len - 1;

        let fits = match *self {
            Bounds::Int { start, delta, .. } => {
                let last = i128::from(start) + i128::from(delta) * steps as i128;
                let (min, max) = match dtype {
                    DataType::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
                    DataType::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
                    DataType::Float32 | DataType::Float64 => return Ok(()),
                };
                [i128::from(start), i128::from(delta), last]
                    .iter()
                    .all(|v| (min..=max).contains(v))
            }
            Bounds::Float { start, delta, .. } => {
                let last = start + delta * steps as f64;
                let values = [start, delta, last];
                match dtype {
                    DataType::Float64 => true,
                    DataType::Float32 => values.iter().all(|v| (*v as f32).is_finite()),
                    DataType::Int32 => values.iter().all(|v| {
                        v.fract() == 0.0 && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX)
                    }),
                    DataType::Int64 => values.iter().all(|v| {
                        v.fract() == 0.0 && *v >= -(2f64.powi(63)) && *v < 2f64.powi(63)
                    }),
                }
            }
        };

        if fits {
            Ok(())
        } else {
            Err(OpError::BadArguments(format!(
                "range parameters {:?} are not representable as {}",
                self, dtype
            )))
        }
    }

    fn start_and_delta(&self) -> (NDArray, NDArray) {
        match *self {
            Bounds::Int { start, delta, .. } => (NDArray::scalar(start), NDArray::scalar(delta)),
            Bounds::Float { start, delta, .. } => (NDArray::scalar(start), NDArray::scalar(delta)),
        }
    }
}

/// Output type for tensor-supplied bounds: the first input's type, unless a
/// later input is floating and the first is not
fn promoted_dtype(inputs: &[&Arc<NDArray>]) -> DataType {
    let first = inputs[0].dtype();
    if first.is_float() {
        return first;
    }
    inputs
        .iter()
        .map(|a| a.dtype())
        .find(DataType::is_float)
        .unwrap_or(first)
}

pub struct RangeOp {
    descriptor: OpDescriptor,
    config: OpsConfig,
}

impl RangeOp {
    pub fn new(config: OpsConfig) -> Self {
        Self {
            descriptor: OpDescriptor::new("range", 0, 1)
                .with_t_args(ArgCount::Variable)
                .with_i_args(ArgCount::Variable),
            config,
        }
    }

    /// Bounds and output type, from inputs, then integer, then floating arguments
    fn resolve(&self, ctx: &OpContext) -> Result<(Bounds, DataType), OpError> {
        if ctx.width() > 0 {
            let inputs = (0..ctx.width())
                .map(|i| ctx.input_array(i))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(position) = inputs.iter().position(|a| a.is_empty()) {
                return Err(OpError::BadArguments(format!(
                    "range input {} is empty",
                    position
                )));
            }

            let dtype = promoted_dtype(&inputs);
            let bounds = if dtype.is_float() {
                let values = inputs
                    .iter()
                    .map(|a| a.e::<f64>(0))
                    .collect::<Result<Vec<_>, _>>()?;
                Bounds::float(&values)?
            } else {
                let values = inputs
                    .iter()
                    .map(|a| a.e::<i64>(0))
                    .collect::<Result<Vec<_>, _>>()?;
                Bounds::int(&values)?
            };
            return Ok((bounds, dtype));
        }

        if !ctx.i_args().is_empty() {
            return Ok((Bounds::int(ctx.i_args())?, self.config.default_range_dtype));
        }

        if !ctx.t_args().is_empty() {
            return Ok((Bounds::float(ctx.t_args())?, self.config.float_range_dtype));
        }

        Err(OpError::BadArguments(
            "range needs input scalars, integer arguments or floating arguments".to_string(),
        ))
    }
}

impl DeclarableOp for RangeOp {
    fn descriptor(&self) -> &OpDescriptor {
        &self.descriptor
    }

    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError> {
        let (bounds, dtype) = self.resolve(ctx)?;
        let len = bounds.len(self.config.max_range_length)?;

        let mut output = match ctx.take_output_buffer() {
            Some(buffer) => {
                if buffer.len() != len {
                    return Err(OpError::BadArguments(format!(
                        "range output holds {} elements, sequence has {}",
                        buffer.len(),
                        len
                    )));
                }
                if self.config.strict_layout && buffer.ews() != Some(1) {
                    return Err(OpError::BadArguments(format!(
                        "range output must be C-ordered with unit stride, got {:?} with strides {:?}",
                        buffer.order(),
                        buffer.strides()
                    )));
                }
                buffer
            }
            None => NDArray::zeros(&[len], dtype),
        };

        bounds.check_representable(output.dtype(), len)?;

        debug!(?bounds, len, dtype = %output.dtype(), "Generating range");
        let (start, delta) = bounds.start_and_delta();
        helpers::range(ctx.launch_context(), &start, &delta, &mut output);

        ctx.set_output(0, output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Device, LaunchContext};
    use crate::types::Status;

    fn run(ctx: &mut OpContext) -> Status {
        RangeOp::new(OpsConfig::default()).execute(ctx)
    }

    fn output_i64(ctx: &OpContext) -> Vec<i64> {
        ctx.output_array(0).unwrap().to_vec::<i64>().unwrap()
    }

    #[test]
    fn test_integer_arguments() {
        let mut ctx = OpContext::new(1).with_i_args(vec![0, 10, 2]);
        assert_eq!(run(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![0, 2, 4, 6, 8]);
        assert_eq!(ctx.output_array(0).unwrap().dtype(), DataType::Int64);
    }

    #[test]
    fn test_single_argument_is_limit() {
        let mut ctx = OpContext::new(1).with_i_args(vec![4]);
        assert_eq!(run(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_descending_with_partial_last_step() {
        let mut ctx = OpContext::new(1).with_i_args(vec![10, 0, -3]);
        assert_eq!(run(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![10, 7, 4, 1]);
    }

    #[test]
    fn test_float_arguments() {
        let mut ctx = OpContext::new(1).with_t_args(vec![0.0, 1.0, 0.25]);
        assert_eq!(run(&mut ctx), Status::Ok);
        let output = ctx.output_array(0).unwrap();
        assert_eq!(output.dtype(), DataType::Float32);
        assert_eq!(output.to_vec::<f32>().unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_tensor_inputs_promote_to_float() {
        let mut ctx = OpContext::new(1)
            .with_array(NDArray::scalar(1i32))
            .with_array(NDArray::scalar(2i32))
            .with_array(NDArray::scalar(0.5f64));
        assert_eq!(run(&mut ctx), Status::Ok);
        let output = ctx.output_array(0).unwrap();
        assert_eq!(output.dtype(), DataType::Float64);
        assert_eq!(output.to_vec::<f64>().unwrap(), vec![1.0, 1.5]);
    }

    #[test]
    fn test_equal_start_and_limit_gives_empty_output() {
        let mut ctx = OpContext::new(1).with_i_args(vec![3, 3]);
        assert_eq!(run(&mut ctx), Status::Ok);
        assert!(ctx.output_array(0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        for args in [vec![0, 5, 0], vec![5, 0, 1], vec![1, 2, 3, 4]] {
            let mut ctx = OpContext::new(1).with_i_args(args);
            assert_eq!(run(&mut ctx), Status::BadArguments);
            assert!(ctx.output(0).is_none());
        }

        let mut ctx = OpContext::new(1).with_t_args(vec![0.0, f64::INFINITY]);
        assert_eq!(run(&mut ctx), Status::BadArguments);

        let mut ctx = OpContext::new(1);
        assert_eq!(run(&mut ctx), Status::BadArguments);
    }

    #[test]
    fn test_length_limit() {
        let op = RangeOp::new(OpsConfig {
            max_range_length: 8,
            ..OpsConfig::default()
        });
        let mut ctx = OpContext::new(1).with_i_args(vec![9]);
        assert_eq!(op.execute(&mut ctx), Status::BadArguments);

        let mut ctx = OpContext::new(1).with_i_args(vec![8]);
        assert_eq!(op.execute(&mut ctx), Status::Ok);
    }

    #[test]
    fn test_preallocated_output_buffer() {
        let mut ctx = OpContext::new(1)
            .with_i_args(vec![0, 3])
            .with_output_buffer(NDArray::zeros(&[3], DataType::Float64));
        assert_eq!(run(&mut ctx), Status::Ok);
        let output = ctx.output_array(0).unwrap();
        assert_eq!(output.dtype(), DataType::Float64);
        assert_eq!(output.to_vec::<f64>().unwrap(), vec![0.0, 1.0, 2.0]);

        let mut ctx = OpContext::new(1)
            .with_i_args(vec![0, 3])
            .with_output_buffer(NDArray::zeros(&[4], DataType::Int64));
        assert_eq!(run(&mut ctx), Status::BadArguments);
    }

    #[test]
    fn test_fractional_delta_into_integer_buffer_rejected() {
        let mut ctx = OpContext::new(1)
            .with_t_args(vec![0.0, 2.0, 0.5])
            .with_output_buffer(NDArray::zeros(&[4], DataType::Int64));
        assert_eq!(run(&mut ctx), Status::BadArguments);
        assert!(ctx.output(0).is_none());

        // Integral floating bounds still fit an integer buffer
        let mut ctx = OpContext::new(1)
            .with_t_args(vec![1.0, 7.0, 2.0])
            .with_output_buffer(NDArray::zeros(&[3], DataType::Int64));
        assert_eq!(run(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![1, 3, 5]);
    }

    #[test]
    fn test_bounds_outside_int32_rejected() {
        let op = RangeOp::new(OpsConfig {
            default_range_dtype: DataType::Int32,
            ..OpsConfig::default()
        });

        let mut ctx = OpContext::new(1).with_i_args(vec![3_000_000_000, 3_000_000_003]);
        assert_eq!(op.execute(&mut ctx), Status::BadArguments);
        assert!(ctx.output(0).is_none());

        // Start fits but the last value would overflow
        let max = i64::from(i32::MAX);
        let mut ctx = OpContext::new(1).with_i_args(vec![max - 1, max + 2]);
        assert_eq!(op.execute(&mut ctx), Status::BadArguments);

        let mut ctx = OpContext::new(1).with_i_args(vec![max - 2, max + 1]);
        assert_eq!(op.execute(&mut ctx), Status::Ok);
        let output = ctx.output_array(0).unwrap();
        assert_eq!(output.dtype(), DataType::Int32);
        assert_eq!(output.to_vec::<i64>().unwrap(), vec![max - 2, max - 1, max]);
    }

    #[test]
    fn test_explicit_launch_context() {
        let mut ctx = OpContext::new(1)
            .with_launch_context(LaunchContext::cpu())
            .with_i_args(vec![3]);
        assert_eq!(ctx.launch_context().device(), Device::Cpu);
        assert_eq!(run(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![0, 1, 2]);
    }

    #[test]
    fn test_strict_layout_rejects_strided_output() {
        let strided = NDArray::zeros(&[2, 3], DataType::Int64).transposed();

        let mut ctx = OpContext::new(1)
            .with_i_args(vec![6])
            .with_output_buffer(strided.clone());
        assert_eq!(run(&mut ctx), Status::BadArguments);

        let relaxed = RangeOp::new(OpsConfig {
            strict_layout: false,
            ..OpsConfig::default()
        });
        let mut ctx = OpContext::new(1)
            .with_i_args(vec![6])
            .with_output_buffer(strided);
        assert_eq!(relaxed.execute(&mut ctx), Status::Ok);
        assert_eq!(output_i64(&ctx), vec![0, 1, 2, 3, 4, 5]);
    }
}
