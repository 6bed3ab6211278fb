// ndops/cli/src/commands/mod.rs

pub mod config;
pub mod ops;
pub mod pick;
pub mod range;

use anyhow::{bail, Result};
use ndops_ops::{OpContext, OpRegistry, Status};

/// Run `name` and turn a failed status into an error for the process exit code
pub(crate) fn run(registry: &OpRegistry, name: &str, ctx: &mut OpContext) -> Result<()> {
    match registry.execute(name, ctx)? {
        Status::Ok => Ok(()),
        status => bail!("{} failed with status {}", name, status),
    }
}
