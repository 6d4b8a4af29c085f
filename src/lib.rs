//! `numeric-kernels` is a small library of NA-aware numeric kernels over `f64` sequences, plus
//! a column-parallel engine that runs kernels over every column of a [`types::DataSet`].
//!
//! Missing values are represented by a distinguished NaN, [`na::NA_REAL`], which is told apart from
//! ordinary NaN by its payload (see [`na::is_na`]).
//!
//! ## Kernels
//!
//! - cumulative scans: [`processing::cum_min`], [`processing::cum_max`], [`processing::cum_prod`]
//! - lagged differences: [`processing::diff`], [`processing::diff_with`]
//! - reductions: [`processing::range`], [`processing::variance`] (Welford), [`processing::median`]
//! - set algebra: [`processing::is_in`], [`processing::unique`], [`processing::union`],
//!   [`processing::intersect`], [`processing::set_difference`]
//! - positional: [`processing::which_max`], [`processing::max_across`]
//!
//! ```rust
//! use numeric_kernels::na::{is_na, NA_REAL};
//! use numeric_kernels::processing::{cum_min, median, variance};
//!
//! let xs = [3.0, 1.0, NA_REAL, 0.5];
//! let scanned = cum_min(&xs);
//! assert_eq!(&scanned[..2], &[3.0, 1.0]);
//! assert!(is_na(scanned[2]) && is_na(scanned[3]));
//!
//! assert!(is_na(median(&xs, false)));
//! assert_eq!(median(&[4.0, 1.0, 3.0], false), 3.0);
//! assert!((variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], false) - 32.0 / 7.0).abs() < 1e-12);
//! ```
//!
//! ## Column execution
//!
//! ```rust
//! use numeric_kernels::execution::{ColumnOp, ColumnOutput, ExecutionEngine, ExecutionOptions};
//! use numeric_kernels::na::NA_REAL;
//! use numeric_kernels::types::{Column, DataSet};
//!
//! # fn main() -> Result<(), numeric_kernels::KernelError> {
//! let ds = DataSet::new(vec![
//!     Column::int32("id", vec![1, 2, 3]),
//!     Column::float64("temperature", vec![21.5, NA_REAL, 19.0]),
//!     Column::float64("pressure", vec![1013.0, 1012.0, 1014.0]),
//! ]);
//!
//! let engine = ExecutionEngine::new(ExecutionOptions::default())?;
//! let results = engine.apply(&ds, ColumnOp::Median { na_rm: true });
//! assert_eq!(results[1].column, "pressure");
//! assert_eq!(results[1].output.as_ref().ok(), Some(&ColumnOutput::Scalar(1013.0)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`na`]: the NA sentinel and float hashing keys
//! - [`processing`]: the kernels and per-column summaries
//! - [`types`]: schema + column-oriented dataset types
//! - [`execution`]: parallel per-column execution with throttling and metrics
//! - [`error`]: the error type shared across the crate

pub mod error;
pub mod execution;
pub mod na;
pub mod processing;
pub mod types;

pub use error::{KernelError, KernelResult};
