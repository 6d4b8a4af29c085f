//! NA-aware numeric kernels.
//!
//! Kernels are pure functions over borrowed slices. They never mutate or retain their input and
//! allocate a fresh result on every call, so independent calls can run on separate threads without
//! coordination (see [`crate::execution`] for a column-parallel driver).
//!
//! - [`scan`]: running min/max/product and lagged differencing
//! - [`reduce`]: range, Welford variance, exact median
//! - [`set`]: membership, uniqueness, union/intersection/difference, which-max, max across sequences
//! - [`summary`]: one-call column summary
//!
//! ## Example: reductions with and without NA removal
//!
//! ```rust
//! use numeric_kernels::na::{is_na, NA_REAL};
//! use numeric_kernels::processing::{median, range, variance};
//!
//! let xs = [2.0, 4.0, NA_REAL, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//!
//! assert!(is_na(variance(&xs, false)));
//! assert!((variance(&xs, true) - 4.571_428_571_428_571).abs() < 1e-10);
//! assert_eq!(range(&xs, true), [2.0, 9.0]);
//! // Nine inputs: odd branch over the eight survivors.
//! assert_eq!(median(&xs, true), 5.0);
//! ```

pub mod reduce;
pub mod scan;
pub mod set;
pub mod summary;

pub use reduce::{median, range, variance, WelfordAccumulator};
pub use scan::{cum_max, cum_min, cum_prod, diff, diff1, diff_with, DiffOptions};
pub use set::{
    intersect, is_in, max_across, max_across_with, set_difference, union, unique,
    unique_with_incomparables, which_max, NaDetection, INTEGER_NA_SENTINEL,
};
pub use summary::{summarize, ColumnSummary};
