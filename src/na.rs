//! The NA ("missing value") sentinel and float keys.
//!
//! NA is one specific quiet-NaN bit pattern: exponent all ones and a low 32-bit payload of `1954`.
//! It is recognised only through [`is_na`]. An ordinary NaN produced by arithmetic (e.g. `0.0 / 0.0`)
//! is *not* NA, and NA is never detected through `x != x`.
//!
//! ```rust
//! use numeric_kernels::na::{is_na, NA_REAL};
//!
//! assert!(is_na(NA_REAL));
//! assert!(!is_na(f64::NAN));
//! assert!(!is_na(1.0));
//! ```

/// Low 32-bit payload carried by the NA bit pattern.
pub const NA_PAYLOAD: u32 = 1954;

const NA_BITS: u64 = 0x7FF0_0000_0000_0000 | NA_PAYLOAD as u64;

/// The missing-value sentinel.
pub const NA_REAL: f64 = f64::from_bits(NA_BITS);

/// Returns `true` if `x` is the NA sentinel.
///
/// Arithmetic may flip the quiet bit or sign of a NaN while keeping its payload, so only NaN-ness and
/// the low word are checked.
#[inline]
pub fn is_na(x: f64) -> bool {
    x.is_nan() && (x.to_bits() & 0xFFFF_FFFF) as u32 == NA_PAYLOAD
}

/// Returns `true` if `x` is a NaN that is not NA.
#[inline]
pub fn is_nan_not_na(x: f64) -> bool {
    x.is_nan() && !is_na(x)
}

/// Returns `true` if any element of `values` is NA.
pub fn any_na(values: &[f64]) -> bool {
    values.iter().any(|&v| is_na(v))
}

/// Number of NA elements in `values`.
pub fn count_na(values: &[f64]) -> usize {
    values.iter().filter(|&&v| is_na(v)).count()
}

/// Hashable, exactly-comparable key for an `f64`.
///
/// Equality is bit-pattern equality with one canonicalisation: `-0.0` keys as `+0.0`. Every NaN
/// payload is its own key, so NA matches NA but not a generic NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(x: f64) -> Self {
        if x == 0.0 {
            Self(0.0_f64.to_bits())
        } else {
            Self(x.to_bits())
        }
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for FloatKey {
    fn from(x: f64) -> Self {
        Self::new(x)
    }
}
