// ndops/cli/src/commands/pick.rs

use anyhow::{Context, Result};
use clap::Args;
use ndops_ops::{NDArray, OpContext, OpRegistry, TensorList};
use serde_json::Value;

#[derive(Args, Debug)]
pub struct PickArgs {
    /// List elements as a JSON array of numeric arrays, e.g. '[[1,2],[3],[4,5]]'
    #[arg(long)]
    pub list: String,

    /// Comma-separated positions to select, e.g. 2,0,0
    #[arg(long, allow_hyphen_values = true)]
    pub indices: String,
}

pub fn execute(args: PickArgs, registry: &OpRegistry) -> Result<()> {
    let picked = select(&args, registry)?;
    println!("{}", serde_json::to_string(&picked)?);
    Ok(())
}

/// Run `pick_list` with the parsed list and an index vector input
pub fn select(args: &PickArgs, registry: &OpRegistry) -> Result<Value> {
    let list = parse_list(&args.list)?;
    let indices = parse_indices(&args.indices)?;

    let mut ctx = OpContext::new(0)
        .with_list(list)
        .with_array(NDArray::vector(indices));
    super::run(registry, "pick_list", &mut ctx)?;

    let picked = ctx.output_list(0).context("pick_list produced no list")?;
    let elements = picked
        .elements()
        .iter()
        .map(|array| super::range::to_json(array))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(elements))
}

fn parse_list(json: &str) -> Result<TensorList> {
    let rows: Vec<Vec<f64>> =
        serde_json::from_str(json).context("--list must be a JSON array of numeric arrays")?;
    Ok(TensorList::from_arrays(
        rows.into_iter().map(NDArray::vector).collect(),
    ))
}

fn parse_indices(text: &str) -> Result<Vec<i64>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .with_context(|| format!("Invalid index '{}'", part))
        })
        .collect()
}
