// ndops/core/ops/src/metrics.rs

// Metrics for tracking operation executions
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};
use std::time::Duration;

use crate::types::Status;

pub static OP_EXECUTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "ndops_op_executions_total",
        "Number of operation executions",
        &["op", "status"]
    )
    .expect("register ndops_op_executions_total")
});

pub static OP_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "ndops_op_duration_seconds",
        "Wall time spent inside an operation",
        &["op"]
    )
    .expect("register ndops_op_duration_seconds")
});

pub static RANGE_ELEMENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "ndops_range_elements_total",
        "Elements written by the range generator"
    )
    .expect("register ndops_range_elements_total")
});

/// Record one finished execution of `op`
pub fn record_execution(op: &str, status: Status, elapsed: Duration) {
    OP_EXECUTIONS_TOTAL
        .with_label_values(&[op, status.as_str()])
        .inc();
    OP_DURATION_SECONDS
        .with_label_values(&[op])
        .observe(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_execution_counts_by_status() {
        let before = OP_EXECUTIONS_TOTAL
            .with_label_values(&["metrics_check", "bad_arguments"])
            .get();
        record_execution("metrics_check", Status::BadArguments, Duration::from_millis(1));
        let after = OP_EXECUTIONS_TOTAL
            .with_label_values(&["metrics_check", "bad_arguments"])
            .get();
        assert_eq!(after, before + 1);
    }
}
