use numeric_kernels::KernelError;
use numeric_kernels::na::{is_na, NA_REAL};
use numeric_kernels::processing::{
    cum_max, cum_min, cum_prod, diff, diff1, intersect, is_in, max_across, median, range,
    set_difference, summarize, union, unique, unique_with_incomparables, variance, which_max,
};

/// Deterministic pseudo-random sequence in [-50, 50).
fn lcg_sequence(seed: u64, len: usize) -> Vec<f64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 100.0 - 50.0
        })
        .collect()
}

#[test]
fn cum_max_is_monotone_non_decreasing() {
    for seed in 1..20 {
        let out = cum_max(&lcg_sequence(seed, 64));
        assert!(out.windows(2).all(|w| w[1] >= w[0]));
    }
}

#[test]
fn cum_min_is_monotone_until_na_then_all_na() {
    let mut x = lcg_sequence(7, 40);
    x[25] = NA_REAL;
    let out = cum_min(&x);

    assert!(out[..25].windows(2).all(|w| w[1] <= w[0]));
    assert!(out[25..].iter().all(|&v| is_na(v)));
}

#[test]
fn first_difference_matches_definition() {
    let x = lcg_sequence(3, 32);
    let d = diff(&x, 1, 1).unwrap();
    assert_eq!(d.len(), x.len() - 1);
    for (i, &v) in d.iter().enumerate() {
        assert_eq!(v, x[i + 1] - x[i]);
    }
    assert_eq!(diff1(&x), d);
}

#[test]
fn iterated_difference_decomposes() {
    let x = lcg_sequence(11, 50);
    for lag in 1..5 {
        let twice = diff(&x, lag, 2).unwrap();
        let composed = diff(&diff(&x, lag, 1).unwrap(), lag, 1).unwrap();
        assert_eq!(twice, composed);
    }
}

#[test]
fn diff_with_lag_past_the_end_is_empty() {
    assert!(diff(&[1.0, 2.0], 2, 1).unwrap().is_empty());
    assert!(diff(&[1.0, 2.0, 4.0], 1, 5).unwrap().is_empty());
}

#[test]
fn reference_values() {
    assert!((variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], false) - 4.571_428_571_428_571).abs() < 1e-12);
    assert_eq!(median(&[1.0, 2.0, 3.0, 4.0], false), 2.5);
    assert_eq!(median(&[1.0, 2.0, 3.0], false), 2.0);
    assert_eq!(range(&[3.0, 1.0, 4.0, 1.0, 5.0], false), [1.0, 5.0]);
    assert_eq!(is_in(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]), vec![false, true, true]);
    assert_eq!(intersect(&[1, 2, 2, 3], &[2, 3, 3, 4]), vec![2, 3]);
    assert_eq!(
        unique_with_incomparables(&[1.0, 1.0, 2.0, 3.0, 3.0], &[3.0]),
        vec![1.0, 2.0, 3.0, 3.0]
    );
    assert_eq!(set_difference(&[5, 1, 5, 2], &[2]), vec![5, 1, 5]);
    assert_eq!(which_max(&[1.0, 9.0, 3.0, 9.0]).unwrap(), 2);
}

#[test]
fn union_contains_everything_once_and_is_idempotent() {
    let x = [3.0, 1.0, 3.0, 2.0];
    let y = [2.0, 5.0, 1.0, 6.0];
    let u = union(&x, &y);
    assert_eq!(u, vec![3.0, 1.0, 2.0, 5.0, 6.0]);

    for v in x.iter().chain(&y) {
        assert_eq!(u.iter().filter(|&&w| w == *v).count(), 1);
    }
    assert_eq!(union(&u, &[]), u);
    assert_eq!(unique(&u), u);
}

#[test]
fn na_rm_variance_ignores_missing_values() {
    let clean = lcg_sequence(5, 100);
    let mut with_na = clean.clone();
    with_na.insert(10, NA_REAL);
    with_na.insert(50, NA_REAL);
    with_na.push(NA_REAL);

    let expected = variance(&clean, false);
    assert!((variance(&with_na, true) - expected).abs() < 1e-9);
    assert!(is_na(variance(&with_na, false)));
}

#[test]
fn median_matches_full_sort_for_odd_lengths() {
    for seed in 1..10 {
        let x = lcg_sequence(seed, 31);
        let mut sorted = x.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(median(&x, false), sorted[15]);
    }
}

#[test]
fn median_matches_full_sort_for_even_lengths() {
    for seed in 1..10 {
        let x = lcg_sequence(seed, 30);
        let mut sorted = x.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(median(&x, false), (sorted[14] + sorted[15]) / 2.0);
    }
}

#[test]
fn inputs_are_never_mutated() {
    let x = lcg_sequence(9, 21);
    let snapshot = x.clone();
    let _ = median(&x, true);
    let _ = cum_min(&x);
    let _ = diff(&x, 2, 2);
    let _ = unique(&x);
    assert_eq!(x, snapshot);
}

#[test]
fn empty_input_contract_violations_are_errors() {
    assert!(matches!(cum_prod(&[]), Err(KernelError::EmptyInput { .. })));
    assert!(matches!(which_max(&[]), Err(KernelError::EmptyInput { .. })));
    assert!(matches!(diff(&[1.0], 0, 1), Err(KernelError::InvalidArgument { name: "lag", .. })));
}

#[test]
fn max_across_integer_sentinel_flags_na() {
    let seqs = vec![vec![1.0, 2.0], vec![i32::MIN as f64, 7.0]];
    assert!(is_na(max_across(&seqs, false)));
    assert_eq!(max_across(&seqs, true), 7.0);
}

#[test]
fn summary_serializes_na_as_null() {
    let summary = summarize(&[1.0, NA_REAL, 3.0], false);
    let json = summary.to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["na_count"], 1);
    assert!(v["median"].is_null());
    assert!(v["variance"].is_null());
}

#[cfg(feature = "deep_tests")]
#[test]
fn variance_is_stable_for_large_offsets() {
    // Naive sum-of-squares loses every significant digit here.
    let x: Vec<f64> = (0..1_000_000).map(|i| 1e9 + (i % 4) as f64).collect();
    assert!((variance(&x, false) - 1.250_001_250_001_25).abs() < 1e-6);
}
