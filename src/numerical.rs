//! Overflow-safe reductions and tolerance-aware float comparison.
//!
//! # Algorithms
//!
//! - **Log-sum-exp**: shifts every term by the maximum before
//!   exponentiating, so the largest exponent evaluated is `exp(0) = 1`.
//!   Terms far below the maximum underflow to zero, which only drops
//!   contributions that are negligible against the dominant one.
//! - **Softmax**: the same max shift, followed by normalisation.
//! - **Approximate equality**: combined relative/absolute tolerance,
//!   `|a − b| ≤ max(rel_tol · max(|a|, |b|), abs_tol)`.
//!
//! # Special values
//!
//! | Input | `log_sum_exp` | `approx_equal` |
//! |---|---|---|
//! | empty | −∞ | n/a |
//! | maximum is ±∞ or NaN | that maximum | n/a |
//! | NaN operand | n/a | `false` |
//! | both ±∞ | n/a | `true` iff same sign |
//! | exactly one ±∞ | n/a | `false` |

use crate::error::{NumericError, Result};

/// Default relative tolerance for [`approx_equal_default`] and [`Tolerance`].
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Default absolute tolerance for [`approx_equal_default`] and [`Tolerance`].
pub const DEFAULT_ABS_TOL: f64 = 0.0;

/// Largest element by `>` comparison, starting from the first.
///
/// A NaN in the first position is kept (every comparison against it is
/// false); a NaN anywhere else is skipped here and surfaces later through
/// the arithmetic.
#[inline]
fn leading_max(x: &[f64]) -> f64 {
    let mut max = x[0];
    for &v in &x[1..] {
        if v > max {
            max = v;
        }
    }
    max
}

/// Computes `ln(Σ exp(xᵢ))` without overflow or underflow.
///
/// # Returns
/// - `−∞` for an empty slice (the log of an empty sum).
/// - The maximum itself when it is `±∞` or NaN.
/// - Otherwise `max + ln(Σ exp(xᵢ − max))`.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_numstable::numerical::log_sum_exp;
/// let lse = log_sum_exp(&[1000.0, 1000.0, 1000.0]);
/// assert!((lse - (1000.0 + 3.0_f64.ln())).abs() < 1e-10);
/// assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
/// ```
pub fn log_sum_exp(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NEG_INFINITY;
    }

    let max = leading_max(x);
    if !max.is_finite() {
        return max;
    }

    let sum: f64 = x.iter().map(|&xi| (xi - max).exp()).sum();
    max + sum.ln()
}

/// Log-sum-exp over the first `n` elements of `buf`.
///
/// Same contract as [`log_sum_exp`]; `n == 0` yields `−∞`. A count larger
/// than the buffer is clamped to `buf.len()`.
///
/// # Examples
/// ```
/// use u_numstable::numerical::{log_sum_exp, log_sum_exp_n};
/// let buf = [1.0, 2.0, 3.0, 99.0];
/// assert_eq!(log_sum_exp_n(&buf, 3), log_sum_exp(&buf[..3]));
/// assert_eq!(log_sum_exp_n(&buf, 0), f64::NEG_INFINITY);
/// ```
pub fn log_sum_exp_n(buf: &[f64], n: usize) -> f64 {
    log_sum_exp(&buf[..n.min(buf.len())])
}

/// Replaces `x` with its softmax, a distribution summing to one.
///
/// An empty slice is left untouched. Callers that still need the raw
/// scores must copy them first, or use [`softmax`].
///
/// If the maximum is `+∞` the shifted term `∞ − ∞` is NaN and the output
/// is NaN; no attempt is made to special-case it.
///
/// # Examples
/// ```
/// use u_numstable::numerical::softmax_inplace;
/// let mut v = [1000.0, 1000.0, 1000.0];
/// softmax_inplace(&mut v);
/// assert!(v.iter().all(|&p| (p - 1.0 / 3.0).abs() < 1e-15));
/// ```
pub fn softmax_inplace(x: &mut [f64]) {
    if x.is_empty() {
        return;
    }

    let max = leading_max(x);
    let mut sum = 0.0;
    for xi in x.iter_mut() {
        *xi = (*xi - max).exp();
        sum += *xi;
    }
    for xi in x.iter_mut() {
        *xi /= sum;
    }
}

/// Returns the softmax of `x` in a new vector, leaving `x` intact.
pub fn softmax(x: &[f64]) -> Vec<f64> {
    let mut out = x.to_vec();
    softmax_inplace(&mut out);
    out
}

/// Compares two floats under a relative and an absolute tolerance.
///
/// - NaN on either side → `false`, including `approx_equal(NaN, NaN, ..)`.
/// - Both infinite → `true` iff the signs agree.
/// - Otherwise `|a − b| ≤ max(rel_tol · max(|a|, |b|), abs_tol)`.
///
/// One infinite and one finite operand always compares `false`: the
/// difference is infinite, and no tolerance admits it.
///
/// # Examples
/// ```
/// use u_numstable::numerical::approx_equal;
/// assert!(approx_equal(1.0, 1.0 + 1e-10, 1e-9, 0.0));
/// assert!(!approx_equal(1e-12, 0.0, 1e-9, 0.0));
/// assert!(approx_equal(1e-12, 0.0, 1e-9, 1e-10));
/// ```
pub fn approx_equal(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() && b.is_infinite() {
        return a.is_sign_positive() == b.is_sign_positive();
    }
    // `rel_tol · ∞` would otherwise make the threshold infinite too.
    if a.is_infinite() || b.is_infinite() {
        return false;
    }

    let diff = (a - b).abs();
    diff <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}

/// [`approx_equal`] with `rel_tol = 1e-9`, `abs_tol = 0`.
pub fn approx_equal_default(a: f64, b: f64) -> bool {
    approx_equal(a, b, DEFAULT_REL_TOL, DEFAULT_ABS_TOL)
}

/// A validated (relative, absolute) tolerance pair.
///
/// # Examples
/// ```
/// use u_numstable::numerical::Tolerance;
/// let tol = Tolerance::new(1e-6, 1e-12).unwrap();
/// assert!(tol.approx_eq(1.0, 1.0 + 1e-7));
/// assert!(Tolerance::new(-1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    rel_tol: f64,
    abs_tol: f64,
}

impl Tolerance {
    /// Creates a tolerance pair.
    ///
    /// # Errors
    /// [`NumericError::InvalidParameter`] if either value is negative or NaN.
    pub fn new(rel_tol: f64, abs_tol: f64) -> Result<Self> {
        if rel_tol.is_nan() || abs_tol.is_nan() || rel_tol < 0.0 || abs_tol < 0.0 {
            return Err(NumericError::InvalidParameter(format!(
                "tolerances must be non-negative, got rel_tol={rel_tol}, abs_tol={abs_tol}"
            )));
        }
        Ok(Self { rel_tol, abs_tol })
    }

    /// Returns the relative tolerance.
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute tolerance.
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// [`approx_equal`] under this tolerance pair.
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        approx_equal(a, b, self.rel_tol, self.abs_tol)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rel_tol: DEFAULT_REL_TOL,
            abs_tol: DEFAULT_ABS_TOL,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
