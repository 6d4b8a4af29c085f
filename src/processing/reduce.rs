//! Whole-sequence reductions that are sensitive to missing values.
//!
//! Every reduction takes an `na_rm` flag. When it is `false`, the first NA short-circuits the
//! reduction to NA. When it is `true`, NA elements are dropped as if they were never there. Ordinary
//! NaN is not NA and goes through the arithmetic untouched.

use crate::na::{is_na, NA_REAL};

/// Range as `[min, max]`.
///
/// - A single element `x0` yields `[x0, x0]`.
/// - Accumulators start at `[+inf, -inf]`, so an empty input, or an all-NA input with `na_rm`,
///   yields `[+inf, -inf]`.
/// - Without `na_rm`, any NA yields `[NA, NA]`.
pub fn range(x: &[f64], na_rm: bool) -> [f64; 2] {
    if let [only] = x {
        return [*only, *only];
    }

    let mut out = [f64::INFINITY, f64::NEG_INFINITY];
    for &cur in x {
        if is_na(cur) {
            if na_rm {
                continue;
            }
            return [NA_REAL, NA_REAL];
        }
        out[0] = out[0].min(cur);
        out[1] = out[1].max(cur);
    }
    out
}

/// Welford's online mean / sum-of-squared-deviations accumulator.
///
/// The first observation only seeds the mean; every later one updates both the mean and `m2`
/// without a second pass over the data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WelfordAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the accumulator.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = x;
            return;
        }
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of observations folded in.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Running mean, `None` before the first observation.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sum of squared deviations from the running mean.
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Bessel-corrected sample variance, `None` with fewer than two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }
}

/// Sample variance (divisor `n - 1`) computed in one pass.
///
/// - Fewer than two elements: NA.
/// - Any NA without `na_rm`: NA.
/// - With `na_rm`, NA elements are skipped and the divisor shrinks by the number skipped; if fewer
///   than two valid values remain the result is NA.
pub fn variance(x: &[f64], na_rm: bool) -> f64 {
    if x.len() < 2 {
        return NA_REAL;
    }

    let mut acc = WelfordAccumulator::new();
    for &cur in x {
        if is_na(cur) {
            if na_rm {
                continue;
            }
            return NA_REAL;
        }
        acc.update(cur);
    }
    acc.sample_variance().unwrap_or(NA_REAL)
}

/// Exact median by selection.
///
/// NA elements are filtered when `na_rm` is set (any NA without it yields NA). Only the middle
/// rank(s) of the filtered values are located, with `which = filtered.len() / 2`. The even/odd branch
/// follows the length of `x` *before* filtering:
///
/// - even `x.len()`: mean of the values at ranks `which - 1` and `which`;
/// - odd `x.len()`: the value at rank `which`.
///
/// An empty filtered set yields NA and a single filtered value is returned on either branch.
///
/// ```rust
/// use numeric_kernels::na::NA_REAL;
/// use numeric_kernels::processing::median;
///
/// assert_eq!(median(&[1.0, 2.0, 3.0, 4.0], false), 2.5);
/// assert_eq!(median(&[3.0, 1.0, 2.0], false), 2.0);
/// // Four inputs, so the even branch applies to the three survivors.
/// assert_eq!(median(&[1.0, 2.0, NA_REAL, 3.0], true), 1.5);
/// ```
pub fn median(x: &[f64], na_rm: bool) -> f64 {
    let mut filtered: Vec<f64> = x.iter().copied().filter(|&v| !is_na(v)).collect();
    if !na_rm && filtered.len() < x.len() {
        return NA_REAL;
    }

    match filtered.len() {
        0 => return NA_REAL,
        1 => return filtered[0],
        _ => {}
    }

    let which = filtered.len() / 2;
    let (lower, nth, _) = filtered.select_nth_unstable_by(which, f64::total_cmp);
    let upper = *nth;
    if x.len() % 2 == 0 {
        // Everything left of `which` is <= upper; its maximum is rank `which - 1`.
        let below = lower
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .unwrap_or(upper);
        (below + upper) / 2.0
    } else {
        upper
    }
}

#[cfg(test)]
mod tests {
    use super::{median, range, variance, WelfordAccumulator};
    use crate::na::{is_na, NA_REAL};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn range_of_plain_values() {
        assert_eq!(range(&[3.0, 1.0, 4.0, 1.0, 5.0], false), [1.0, 5.0]);
    }

    #[test]
    fn range_single_element() {
        assert_eq!(range(&[2.5], false), [2.5, 2.5]);
        let na = range(&[NA_REAL], false);
        assert!(is_na(na[0]) && is_na(na[1]));
    }

    #[test]
    fn range_na_short_circuits_without_na_rm() {
        let out = range(&[3.0, NA_REAL, 5.0], false);
        assert!(is_na(out[0]) && is_na(out[1]));
    }

    #[test]
    fn range_skips_na_with_na_rm() {
        assert_eq!(range(&[3.0, NA_REAL, 5.0, -1.0], true), [-1.0, 5.0]);
    }

    #[test]
    fn range_all_na_removed_is_inverted_infinities() {
        assert_eq!(
            range(&[NA_REAL, NA_REAL], true),
            [f64::INFINITY, f64::NEG_INFINITY]
        );
        assert_eq!(range(&[], false), [f64::INFINITY, f64::NEG_INFINITY]);
    }

    #[test]
    fn range_ignores_ordinary_nan() {
        assert_eq!(range(&[2.0, f64::NAN, 7.0], false), [2.0, 7.0]);
    }

    #[test]
    fn welford_accumulator_matches_two_pass() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut acc = WelfordAccumulator::new();
        assert_eq!(acc.mean(), None);
        for &x in &xs {
            acc.update(x);
        }
        assert_eq!(acc.count(), 8);
        assert!(approx(acc.mean().unwrap(), 5.0));
        assert!(approx(acc.m2(), 32.0));
        assert!(approx(acc.sample_variance().unwrap(), 32.0 / 7.0));
    }

    #[test]
    fn welford_single_observation_has_no_variance() {
        let mut acc = WelfordAccumulator::new();
        acc.update(3.0);
        assert_eq!(acc.mean(), Some(3.0));
        assert_eq!(acc.m2(), 0.0);
        assert_eq!(acc.sample_variance(), None);
    }

    #[test]
    fn variance_reference_value() {
        let v = variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], false);
        assert!((v - 4.571_428_571_428_571).abs() < 1e-10);
    }

    #[test]
    fn variance_too_short_is_na() {
        assert!(is_na(variance(&[], false)));
        assert!(is_na(variance(&[1.0], true)));
    }

    #[test]
    fn variance_na_without_na_rm_is_na() {
        assert!(is_na(variance(&[1.0, 2.0, NA_REAL, 4.0], false)));
    }

    #[test]
    fn variance_skipped_na_do_not_perturb_result() {
        let clean = variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], false);
        let with_na = variance(
            &[NA_REAL, 2.0, 4.0, NA_REAL, 4.0, 4.0, 5.0, 5.0, 7.0, NA_REAL, 9.0],
            true,
        );
        assert!(approx(clean, with_na));
    }

    #[test]
    fn variance_leading_na_seeds_from_first_valid_value() {
        let v = variance(&[NA_REAL, 1.0, 3.0], true);
        assert!(approx(v, 2.0));
    }

    #[test]
    fn variance_fewer_than_two_valid_is_na() {
        assert!(is_na(variance(&[NA_REAL, 1.0], true)));
        assert!(is_na(variance(&[NA_REAL, NA_REAL, NA_REAL], true)));
    }

    #[test]
    fn variance_is_stable_under_large_offset() {
        let base = 1e9;
        let xs: Vec<f64> = [4.0, 7.0, 13.0, 16.0].iter().map(|v| v + base).collect();
        assert!((variance(&xs, false) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0], false), 2.5);
        assert_eq!(median(&[1.0, 2.0, 3.0], false), 2.0);
        assert_eq!(median(&[9.0, -1.0, 4.0, 4.0, 0.0, 7.0], false), 4.0);
        assert_eq!(median(&[5.0, 3.0, 1.0, 4.0, 2.0], false), 3.0);
    }

    #[test]
    fn median_does_not_mutate_input() {
        let xs = vec![4.0, 1.0, 3.0, 2.0];
        let _ = median(&xs, false);
        assert_eq!(xs, vec![4.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn median_na_without_na_rm_is_na() {
        assert!(is_na(median(&[1.0, NA_REAL, 3.0], false)));
    }

    #[test]
    fn median_parity_comes_from_unfiltered_length() {
        // 4 inputs -> even branch over [1, 2, 3]: (1 + 2) / 2.
        assert_eq!(median(&[1.0, 2.0, NA_REAL, 3.0], true), 1.5);
        // 3 inputs -> odd branch over [1, 2]: rank 1.
        assert_eq!(median(&[2.0, NA_REAL, 1.0], true), 2.0);
        // 5 inputs -> odd branch over [1, 2, 3, 4]: rank 2.
        assert_eq!(median(&[4.0, NA_REAL, 3.0, 2.0, 1.0], true), 3.0);
    }

    #[test]
    fn median_degenerate_filtered_sizes() {
        assert!(is_na(median(&[], false)));
        assert!(is_na(median(&[NA_REAL, NA_REAL], true)));
        assert_eq!(median(&[NA_REAL, 5.0], true), 5.0);
        assert_eq!(median(&[8.0], false), 8.0);
    }
}
