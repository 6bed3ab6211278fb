// ndops/cli/src/commands/range.rs

use anyhow::{anyhow, Context, Result};
use clap::Args;
use ndops_ops::{DataType, NDArray, OpContext, OpRegistry};
use serde_json::Value;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// First value of the sequence
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub start: f64,

    /// Exclusive bound of the sequence
    #[arg(long, allow_hyphen_values = true)]
    pub limit: f64,

    /// Step between values
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub delta: f64,

    /// Output type (float32 | float64 | int32 | int64). Integral bounds
    /// default to the configured integer type, others to the float type.
    #[arg(long)]
    pub dtype: Option<String>,
}

pub fn execute(args: RangeArgs, registry: &OpRegistry) -> Result<()> {
    let output = generate(&args, registry)?;
    println!("{}", serde_json::to_string(&to_json(&output)?)?);
    Ok(())
}

/// Build the `range` invocation for `args` and return its output
pub fn generate(args: &RangeArgs, registry: &OpRegistry) -> Result<Arc<NDArray>> {
    let bounds = [args.start, args.limit, args.delta];

    let mut ctx = match &args.dtype {
        Some(name) => {
            let dtype = DataType::from_str(name)
                .ok_or_else(|| anyhow!("Unknown data type '{}'", name))?;
            bounds
                .iter()
                .fold(OpContext::new(0), |ctx, &value| ctx.with_array(scalar_of(value, dtype)))
        }
        None if bounds.iter().all(|v| v.is_finite() && v.fract() == 0.0) => {
            OpContext::new(0).with_i_args(bounds.iter().map(|&v| v as i64).collect())
        }
        None => OpContext::new(0).with_t_args(bounds.to_vec()),
    };

    super::run(registry, "range", &mut ctx)?;
    ctx.output_array(0)
        .cloned()
        .context("range produced no output")
}

fn scalar_of(value: f64, dtype: DataType) -> NDArray {
    match dtype {
        DataType::Float32 => NDArray::scalar(value as f32),
        DataType::Float64 => NDArray::scalar(value),
        DataType::Int32 => NDArray::scalar(value as i32),
        DataType::Int64 => NDArray::scalar(value as i64),
    }
}

/// Integer arrays print as integers, floating arrays as floats
pub(crate) fn to_json(array: &NDArray) -> Result<Value> {
    let value = if array.dtype().is_float() {
        serde_json::to_value(array.to_vec::<f64>()?)?
    } else {
        serde_json::to_value(array.to_vec::<i64>()?)?
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndops_ops::OpsConfig;

    fn registry() -> OpRegistry {
        OpRegistry::with_defaults(&OpsConfig::default()).unwrap()
    }

    fn args(start: f64, limit: f64, delta: f64, dtype: Option<&str>) -> RangeArgs {
        RangeArgs {
            start,
            limit,
            delta,
            dtype: dtype.map(str::to_string),
        }
    }

    #[test]
    fn test_integral_bounds_use_integer_type() {
        let output = generate(&args(0.0, 10.0, 3.0, None), &registry()).unwrap();
        assert_eq!(output.dtype(), DataType::Int64);
        assert_eq!(output.to_vec::<i64>().unwrap(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_fractional_bounds_use_float_type() {
        let output = generate(&args(0.0, 1.0, 0.25, None), &registry()).unwrap();
        assert_eq!(output.dtype(), DataType::Float32);
        assert_eq!(output.to_vec::<f32>().unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_explicit_dtype() {
        let output = generate(&args(5.0, 0.0, -2.0, Some("i32")), &registry()).unwrap();
        assert_eq!(output.dtype(), DataType::Int32);
        assert_eq!(to_json(&output).unwrap(), serde_json::json!([5, 3, 1]));
    }

    #[test]
    fn test_failures_surface_as_errors() {
        assert!(generate(&args(0.0, 4.0, 0.0, None), &registry()).is_err());
        assert!(generate(&args(0.0, 4.0, 1.0, Some("complex")), &registry()).is_err());
    }
}
