// ndops/core/ops/src/registry.rs

// Declarable operation trait and the name -> implementation table
use crate::config::OpsConfig;
use crate::context::OpContext;
use crate::generic::RangeOp;
use crate::list::{CreateList, PickList, ReadList, SizeList, StackList, UnstackList, WriteList};
use crate::metrics;
use crate::types::{OpDescriptor, OpError, Status};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// An operation the graph executor can invoke by name
pub trait DeclarableOp: Send + Sync {
    fn descriptor(&self) -> &OpDescriptor;

    /// Run the operation, attaching outputs to `ctx` only on success
    fn validate_and_execute(&self, ctx: &mut OpContext) -> Result<(), OpError>;

    /// Framework entry point: argument checks, execution, metrics, status
    fn execute(&self, ctx: &mut OpContext) -> Status {
        let descriptor = self.descriptor();
        let started = Instant::now();

        let result = descriptor
            .check_arguments(ctx)
            .and_then(|_| self.validate_and_execute(ctx));

        let status = match result {
            Ok(()) => {
                trace!(op = descriptor.name, node = ctx.node_id(), "Operation finished");
                Status::Ok
            }
            Err(e) => {
                debug!(
                    op = descriptor.name,
                    node = ctx.node_id(),
                    error = %e,
                    "Operation failed"
                );
                ctx.clear_outputs();
                e.status()
            }
        };

        metrics::record_execution(descriptor.name, status, started.elapsed());
        status
    }
}

/// Explicit operation table, built once at start-up
#[derive(Default)]
pub struct OpRegistry {
    ops: HashMap<&'static str, Arc<dyn DeclarableOp>>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in operation
    pub fn with_defaults(config: &OpsConfig) -> Result<Self, OpError> {
        config.validate()?;

        let mut registry = Self::new();
        registry.register(Arc::new(CreateList::new()))?;
        registry.register(Arc::new(WriteList::new()))?;
        registry.register(Arc::new(ReadList::new()))?;
        registry.register(Arc::new(SizeList::new()))?;
        registry.register(Arc::new(PickList::new()))?;
        registry.register(Arc::new(StackList::new()))?;
        registry.register(Arc::new(UnstackList::new()))?;
        registry.register(Arc::new(RangeOp::new(config.clone())))?;

        debug!(ops = registry.len(), "Operation registry built");
        Ok(registry)
    }

    pub fn register(&mut self, op: Arc<dyn DeclarableOp>) -> Result<(), OpError> {
        let name = op.descriptor().name;
        if self.ops.contains_key(name) {
            return Err(OpError::DuplicateOp(name.to_string()));
        }
        self.ops.insert(name, op);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DeclarableOp>> {
        self.ops.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Descriptors of every registered operation, sorted by name
    pub fn descriptors(&self) -> Vec<&OpDescriptor> {
        let mut descriptors: Vec<_> = self.ops.values().map(|op| op.descriptor()).collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors
    }

    pub fn execute(&self, name: &str, ctx: &mut OpContext) -> Result<Status, OpError> {
        let op = self
            .get(name)
            .ok_or_else(|| OpError::UnknownOp(name.to_string()))?;
        Ok(op.execute(ctx))
    }
}
