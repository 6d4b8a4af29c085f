//! Column-parallel execution of the numeric kernels.
//!
//! Kernels are pure and keep no shared state, so running one per column needs no synchronization
//! beyond collecting results. This module sits "above" [`crate::processing`] and provides:
//!
//! - a [`ColumnOp`] dispatch over every float column of a [`DataSet`], one rayon task per column
//! - a bound on concurrently processed columns
//! - real-time metrics + observer hooks for monitoring

mod observer;
mod semaphore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::processing::{
    cum_max, cum_min, cum_prod, diff_with, max_across_with, median, range, unique, variance,
    which_max, DiffOptions, NaDetection,
};
use crate::types::DataSet;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// A kernel applied to one float column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOp {
    CumMin,
    CumMax,
    CumProd,
    Diff(DiffOptions),
    Range { na_rm: bool },
    Variance { na_rm: bool },
    Median { na_rm: bool },
    WhichMax,
    Unique,
}

/// Output of a [`ColumnOp`] for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOutput {
    Sequence(Vec<f64>),
    Scalar(f64),
    Index(usize),
}

impl ColumnOp {
    /// Run the kernel on `values`.
    pub fn apply(self, values: &[f64]) -> KernelResult<ColumnOutput> {
        Ok(match self {
            Self::CumMin => ColumnOutput::Sequence(cum_min(values)),
            Self::CumMax => ColumnOutput::Sequence(cum_max(values)),
            Self::CumProd => ColumnOutput::Sequence(cum_prod(values)?),
            Self::Diff(opts) => ColumnOutput::Sequence(diff_with(values, opts)?),
            Self::Range { na_rm } => ColumnOutput::Sequence(range(values, na_rm).to_vec()),
            Self::Variance { na_rm } => ColumnOutput::Scalar(variance(values, na_rm)),
            Self::Median { na_rm } => ColumnOutput::Scalar(median(values, na_rm)),
            Self::WhichMax => ColumnOutput::Index(which_max(values)?),
            Self::Unique => ColumnOutput::Sequence(unique(values)),
        })
    }
}

/// Result of a [`ColumnOp`] for one named column.
#[derive(Debug)]
pub struct ColumnResult {
    pub column: String,
    pub output: KernelResult<ColumnOutput>,
}

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Upper bound on concurrently processed columns.
    ///
    /// This is an additional throttle on top of `num_threads`, bounding working memory.
    pub max_in_flight_columns: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_parallelism();
        Self {
            num_threads: Some(n),
            max_in_flight_columns: n,
        }
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A configurable engine running kernels over the columns of a [`DataSet`].
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidArgument`] if `max_in_flight_columns == 0` or
    /// `num_threads == Some(0)`, and [`KernelError::ThreadPool`] if the pool cannot be built.
    pub fn new(opts: ExecutionOptions) -> KernelResult<Self> {
        if opts.max_in_flight_columns == 0 {
            return Err(KernelError::InvalidArgument {
                name: "max_in_flight_columns",
                message: "must be > 0".to_string(),
            });
        }
        if opts.num_threads == Some(0) {
            return Err(KernelError::InvalidArgument {
                name: "num_threads",
                message: "must be > 0 when set".to_string(),
            });
        }

        let n_threads = opts.num_threads.unwrap_or_else(available_parallelism);
        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Apply `op` to every float column of `dataset`, one task per column.
    ///
    /// Results come back in schema order; integer columns are skipped. A kernel error affects only
    /// its own column.
    pub fn apply(&self, dataset: &DataSet, op: ColumnOp) -> Vec<ColumnResult> {
        let columns: Vec<(&str, &[f64])> = dataset.float_columns().collect();
        self.pool.install(|| self.apply_impl(&columns, op))
    }

    fn apply_impl(&self, columns: &[(&str, &[f64])], op: ColumnOp) -> Vec<ColumnResult> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            op,
            columns: columns.len(),
        });

        let sem = Semaphore::new(self.opts.max_in_flight_columns);
        let out: Vec<ColumnResult> = columns
            .par_iter()
            .map(|&(name, values)| {
                let permit = sem.acquire();
                if permit.waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(permit.waited);
                    self.emit(ExecutionEvent::ThrottleWaited {
                        column: name.to_string(),
                        duration: permit.waited,
                    });
                }

                self.metrics.on_column_start(values.len());
                self.emit(ExecutionEvent::ColumnStarted {
                    column: name.to_string(),
                    len: values.len(),
                });

                let output = op.apply(values);

                self.emit(ExecutionEvent::ColumnFinished {
                    column: name.to_string(),
                    ok: output.is_ok(),
                });
                self.metrics.on_column_end(output.is_ok());
                drop(permit);

                ColumnResult {
                    column: name.to_string(),
                    output,
                }
            })
            .collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });
        out
    }

    /// Maximum across every float column, see [`crate::processing::max_across_with`].
    pub fn max_across_columns(&self, dataset: &DataSet, na_rm: bool, detection: NaDetection) -> f64 {
        let columns: Vec<&[f64]> = dataset.float_columns().map(|(_, v)| v).collect();
        max_across_with(&columns, na_rm, detection)
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
