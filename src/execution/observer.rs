use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use serde::Serialize;

use super::ColumnOp;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { op: ColumnOp, columns: usize },
    ThrottleWaited { column: String, duration: Duration },
    ColumnStarted { column: String, len: usize },
    ColumnFinished { column: String, ok: bool },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// A simple stderr logger for execution events.
#[derive(Debug, Default)]
pub struct StdErrExecutionObserver;

impl ExecutionObserver for StdErrExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunFinished { metrics, .. } => eprintln!("[exec][done] {metrics}"),
            other => eprintln!("[exec] {other:?}"),
        }
    }
}

/// Real-time metrics for an execution run.
///
/// The engine updates these counters during execution; callers can snapshot them at any time.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,

    values_processed: AtomicU64,
    columns_started: AtomicU64,
    columns_finished: AtomicU64,
    columns_failed: AtomicU64,
    throttle_wait_ns: AtomicU64,

    active_columns: AtomicUsize,
    max_active_columns: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            values_processed: AtomicU64::new(0),
            columns_started: AtomicU64::new(0),
            columns_finished: AtomicU64::new(0),
            columns_failed: AtomicU64::new(0),
            throttle_wait_ns: AtomicU64::new(0),
            active_columns: AtomicUsize::new(0),
            max_active_columns: AtomicUsize::new(0),
        }
    }

    pub fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.values_processed.store(0, Ordering::SeqCst);
        self.columns_started.store(0, Ordering::SeqCst);
        self.columns_finished.store(0, Ordering::SeqCst);
        self.columns_failed.store(0, Ordering::SeqCst);
        self.throttle_wait_ns.store(0, Ordering::SeqCst);
        self.active_columns.store(0, Ordering::SeqCst);
        self.max_active_columns.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns.store(saturating_nanos(elapsed), Ordering::SeqCst);
    }

    pub fn on_column_start(&self, len: usize) {
        self.columns_started.fetch_add(1, Ordering::SeqCst);
        self.values_processed.fetch_add(len as u64, Ordering::SeqCst);
        let now = self.active_columns.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_columns.fetch_max(now, Ordering::SeqCst);
    }

    pub fn on_column_end(&self, ok: bool) {
        self.columns_finished.fetch_add(1, Ordering::SeqCst);
        if !ok {
            self.columns_failed.fetch_add(1, Ordering::SeqCst);
        }
        self.active_columns.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn on_throttle_wait(&self, d: Duration) {
        self.throttle_wait_ns
            .fetch_add(saturating_nanos(d), Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed: (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns)),
            values_processed: self.values_processed.load(Ordering::SeqCst),
            columns_started: self.columns_started.load(Ordering::SeqCst),
            columns_finished: self.columns_finished.load(Ordering::SeqCst),
            columns_failed: self.columns_failed.load(Ordering::SeqCst),
            throttle_wait: Duration::from_nanos(self.throttle_wait_ns.load(Ordering::SeqCst)),
            max_active_columns: self.max_active_columns.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn saturating_nanos(d: Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub values_processed: u64,
    pub columns_started: u64,
    pub columns_finished: u64,
    pub columns_failed: u64,
    pub throttle_wait: Duration,
    pub max_active_columns: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, values_processed={}, columns={}/{} (failed={}), max_active_columns={}, throttle_wait={:?}, elapsed={:?}",
            self.run_id,
            self.values_processed,
            self.columns_finished,
            self.columns_started,
            self.columns_failed,
            self.max_active_columns,
            self.throttle_wait,
            self.elapsed
        )
    }
}
