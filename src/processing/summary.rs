//! One-call column summary built from the reduction and set kernels.

use serde::Serialize;

use crate::na::count_na;

use super::reduce::{median, range, variance};
use super::set::which_max;

/// Summary statistics for one numeric sequence.
///
/// NA results are kept as the NA sentinel, so they serialize to JSON `null` (serde_json writes every
/// non-finite float as `null`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Number of elements, NA included.
    pub len: usize,
    /// Number of NA elements.
    pub na_count: usize,
    /// `[min, max]` as returned by [`range`].
    pub range: [f64; 2],
    /// Sample variance as returned by [`variance`].
    pub variance: f64,
    /// Median as returned by [`median`].
    pub median: f64,
    /// 1-based index of the first maximum, `None` for an empty sequence.
    pub which_max: Option<usize>,
}

/// Summarize `values`, honouring `na_rm` in every NA-sensitive statistic.
pub fn summarize(values: &[f64], na_rm: bool) -> ColumnSummary {
    ColumnSummary {
        len: values.len(),
        na_count: count_na(values),
        range: range(values, na_rm),
        variance: variance(values, na_rm),
        median: median(values, na_rm),
        which_max: which_max(values).ok(),
    }
}

impl ColumnSummary {
    /// Serialize the summary as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
