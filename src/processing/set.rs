//! Membership, uniqueness and set algebra, plus index-of-maximum and multi-sequence maximum.
//!
//! Float operations hash values through [`FloatKey`]: exact bit patterns, with `-0.0` folded onto
//! `+0.0`. NA is an ordinary key here and matches NA; a generic NaN never matches NA.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};
use crate::na::{is_na, FloatKey, NA_REAL};

fn key_set(values: &[f64]) -> HashSet<FloatKey> {
    values.iter().copied().map(FloatKey::new).collect()
}

/// For every element of `x`, whether it occurs in `y`.
pub fn is_in(x: &[f64], y: &[f64]) -> Vec<bool> {
    let table = key_set(y);
    x.iter()
        .map(|&v| table.contains(&FloatKey::new(v)))
        .collect()
}

/// Distinct values of `x` in first-occurrence order.
///
/// Values listed in `incomparables` are never deduplicated: every occurrence is emitted.
///
/// ```rust
/// use numeric_kernels::processing::unique_with_incomparables;
///
/// let out = unique_with_incomparables(&[1.0, 1.0, 2.0, 3.0, 3.0], &[3.0]);
/// assert_eq!(out, vec![1.0, 2.0, 3.0, 3.0]);
/// ```
pub fn unique_with_incomparables(x: &[f64], incomparables: &[f64]) -> Vec<f64> {
    let inc = key_set(incomparables);
    let mut seen = HashSet::with_capacity(x.len());
    let mut out = Vec::new();
    for &cur in x {
        let key = FloatKey::new(cur);
        // `insert` runs first so incomparable values are still recorded as seen.
        if seen.insert(key) || inc.contains(&key) {
            out.push(cur);
        }
    }
    out
}

/// Distinct values of `x` in first-occurrence order.
pub fn unique(x: &[f64]) -> Vec<f64> {
    unique_with_incomparables(x, &[])
}

/// Distinct values of `x` followed by the new values of `y`, each once, in first-occurrence order.
pub fn union(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut all = Vec::with_capacity(x.len() + y.len());
    all.extend_from_slice(x);
    all.extend_from_slice(y);
    unique(&all)
}

/// Sorted intersection of two integer sequences.
///
/// Each common value appears as many times as its smaller multiplicity across the two inputs.
pub fn intersect(x: &[i32], y: &[i32]) -> Vec<i32> {
    let mut xs = x.to_vec();
    let mut ys = y.to_vec();
    xs.sort_unstable();
    ys.sort_unstable();

    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        match xs[i].cmp(&ys[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(xs[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Elements of `x` that do not occur in `y`, in `x` order, duplicates kept.
pub fn set_difference(x: &[i32], y: &[i32]) -> Vec<i32> {
    let table: HashSet<i32> = y.iter().copied().collect();
    x.iter().copied().filter(|v| !table.contains(v)).collect()
}

/// 1-based position of the first maximum.
///
/// Comparison is the strict `<`, so NaN never displaces a number and a leading NaN is never
/// displaced.
///
/// # Errors
///
/// Returns [`KernelError::EmptyInput`] for an empty sequence.
pub fn which_max(x: &[f64]) -> KernelResult<usize> {
    let (&first, rest) = x
        .split_first()
        .ok_or(KernelError::EmptyInput { op: "which_max" })?;
    let mut best = first;
    let mut best_idx = 0;
    for (i, &cur) in rest.iter().enumerate() {
        if best < cur {
            best = cur;
            best_idx = i + 1;
        }
    }
    Ok(best_idx + 1)
}

/// Value of `i32::MIN` that an integer NA takes after widening to `f64`.
pub const INTEGER_NA_SENTINEL: f64 = i32::MIN as f64;

/// How [`max_across_with`] decides that a sequence carries a missing value.
///
/// Neither predicate is exact. `IntegerSentinel` fires on any sequence whose minimum is
/// `i32::MIN` (a legitimate value in integer data) and misses real NA in float data. `Payload`
/// recognises NA in float data but misses integer NA that was widened to `i32::MIN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaDetection {
    /// The sequence minimum equals [`INTEGER_NA_SENTINEL`].
    #[default]
    IntegerSentinel,
    /// Some element satisfies [`crate::na::is_na`].
    Payload,
}

impl NaDetection {
    /// Whether `seq` is considered to contain NA under this predicate.
    pub fn detects(self, seq: &[f64]) -> bool {
        match self {
            Self::IntegerSentinel => {
                let min = seq
                    .iter()
                    .copied()
                    .reduce(|lo, cur| if cur < lo { cur } else { lo });
                min == Some(INTEGER_NA_SENTINEL)
            }
            Self::Payload => seq.iter().any(|&v| is_na(v)),
        }
    }
}

/// Maximum over several sequences, using [`NaDetection::IntegerSentinel`].
pub fn max_across<S: AsRef<[f64]>>(seqs: &[S], na_rm: bool) -> f64 {
    max_across_with(seqs, na_rm, NaDetection::default())
}

/// Maximum over several sequences.
///
/// Starts from `-inf`. Without `na_rm`, the first sequence for which `detection` fires makes the
/// result NA. With `na_rm`, NA elements are dropped before each sequence's maximum is taken. Empty
/// sequences contribute nothing.
pub fn max_across_with<S: AsRef<[f64]>>(seqs: &[S], na_rm: bool, detection: NaDetection) -> f64 {
    let mut cur_max = f64::NEG_INFINITY;
    for seq in seqs {
        let seq = seq.as_ref();
        if !na_rm && detection.detects(seq) {
            return NA_REAL;
        }
        let this_max = seq
            .iter()
            .copied()
            .filter(|&v| !(na_rm && is_na(v)))
            .reduce(|hi, cur| if hi < cur { cur } else { hi });
        if let Some(m) = this_max {
            if cur_max < m {
                cur_max = m;
            }
        }
    }
    cur_max
}
