//! Single-pass prefix scans and lagged differencing.
//!
//! Scans compare with the strict `<` operator, so an ordinary NaN never replaces an accumulator that
//! already holds a number, and a NaN accumulator is never replaced. Only [`cum_min`] checks for NA
//! explicitly; [`cum_max`] lets NA fall through that comparison like any other NaN.

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::na::{is_na, NA_REAL};

/// Running minimum with sticky NA.
///
/// `out[0] = x[0]`. From the first NA at position `i >= 1` onwards every output is NA. A leading NA
/// is carried forward as well, since no number compares below it. Inputs shorter than two elements
/// are returned unchanged.
pub fn cum_min(x: &[f64]) -> Vec<f64> {
    if x.len() < 2 {
        return x.to_vec();
    }
    let mut out = Vec::with_capacity(x.len());
    out.push(x[0]);
    let mut na_found = false;
    for &cur in &x[1..] {
        if na_found || is_na(cur) {
            na_found = true;
            out.push(NA_REAL);
            continue;
        }
        let prev = out[out.len() - 1];
        out.push(if cur < prev { cur } else { prev });
    }
    out
}

/// Running maximum.
///
/// Unlike [`cum_min`] there is no NA stickiness: an NA after a number is ignored by the comparison,
/// and a leading NA is carried forward because nothing compares greater than it.
pub fn cum_max(x: &[f64]) -> Vec<f64> {
    if x.len() < 2 {
        return x.to_vec();
    }
    let mut out = Vec::with_capacity(x.len());
    out.push(x[0]);
    for &cur in &x[1..] {
        let prev = out[out.len() - 1];
        out.push(if prev < cur { cur } else { prev });
    }
    out
}

/// Running product. NA propagates through multiplication like any NaN.
///
/// # Errors
///
/// Returns [`KernelError::EmptyInput`] for an empty sequence.
pub fn cum_prod(x: &[f64]) -> KernelResult<Vec<f64>> {
    let (&first, rest) = x
        .split_first()
        .ok_or(KernelError::EmptyInput { op: "cum_prod" })?;
    let mut out = Vec::with_capacity(x.len());
    out.push(first);
    let mut acc = first;
    for &cur in rest {
        acc *= cur;
        out.push(acc);
    }
    Ok(out)
}

/// Parameters for [`diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Distance between the subtracted elements.
    pub lag: usize,
    /// Number of times the differencing pass is applied.
    pub differences: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            lag: 1,
            differences: 1,
        }
    }
}

/// Lagged, iterated difference: `out[i] = x[i + lag] - x[i]`, applied `differences` times.
///
/// Once a pass runs out of elements (`lag >= len`) the result is empty.
///
/// # Errors
///
/// Returns [`KernelError::InvalidArgument`] if `lag` or `differences` is zero.
pub fn diff(x: &[f64], lag: usize, differences: usize) -> KernelResult<Vec<f64>> {
    if lag == 0 {
        return Err(KernelError::InvalidArgument {
            name: "lag",
            message: "must be >= 1".to_string(),
        });
    }
    if differences == 0 {
        return Err(KernelError::InvalidArgument {
            name: "differences",
            message: "must be >= 1".to_string(),
        });
    }

    let mut out = lagged_difference(x, lag);
    for _ in 1..differences {
        if out.is_empty() {
            break;
        }
        out = lagged_difference(&out, lag);
    }
    Ok(out)
}

/// [`diff`] driven by a [`DiffOptions`].
pub fn diff_with(x: &[f64], opts: DiffOptions) -> KernelResult<Vec<f64>> {
    diff(x, opts.lag, opts.differences)
}

/// First differences (`lag = 1`, `differences = 1`).
pub fn diff1(x: &[f64]) -> Vec<f64> {
    lagged_difference(x, 1)
}

fn lagged_difference(x: &[f64], lag: usize) -> Vec<f64> {
    if lag >= x.len() {
        return Vec::new();
    }
    x[lag..].iter().zip(x).map(|(hi, lo)| hi - lo).collect()
}
