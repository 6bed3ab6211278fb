// ndops/cli/src/commands/ops.rs

use colored::Colorize;
use ndops_ops::{OpDescriptor, OpRegistry};

pub fn execute(registry: &OpRegistry) {
    println!("{}", "Registered operations:".bold());
    for descriptor in registry.descriptors() {
        println!("  {}", summary(descriptor));
    }
}

fn summary(descriptor: &OpDescriptor) -> String {
    let kind = if descriptor.is_list_op { "list" } else { "array" };
    format!(
        "{:<14} {:<6} inputs={} outputs={} t_args={} i_args={}",
        descriptor.name.green(),
        kind,
        descriptor.num_inputs,
        descriptor.num_outputs,
        descriptor.t_args,
        descriptor.i_args,
    )
}
