//! Operation metrics.
//!
//! Emitted through the `metrics` facade; nothing is recorded unless the host
//! application installs a recorder.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;
use vcache_core::{VcacheError, VcacheResult};

/// Metric names.
pub mod names {
    /// Cache calls by operation and outcome.
    pub const OPERATIONS_TOTAL: &str = "vcache_operations_total";
    /// Store round-trip latency in seconds.
    pub const OPERATION_DURATION: &str = "vcache_operation_duration_seconds";
}

/// Register metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::OPERATIONS_TOTAL,
        "Total number of cache operations by op and outcome"
    );
    describe_histogram!(
        names::OPERATION_DURATION,
        metrics::Unit::Seconds,
        "Cache operation latency"
    );
}

/// Outcome label for a finished call.
pub(crate) fn outcome<T>(result: &VcacheResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(VcacheError::Cancelled) => "cancelled",
        Err(VcacheError::Timeout(_)) => "timeout",
        Err(_) => "error",
    }
}

/// Records one finished call.
pub(crate) fn record(op: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!(names::OPERATIONS_TOTAL, "op" => op, "outcome" => outcome).increment(1);
    histogram!(names::OPERATION_DURATION, "op" => op).record(elapsed.as_secs_f64());
}
