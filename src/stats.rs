//! Streaming moments and compensated summation.
//!
//! # Algorithms
//!
//! - **Mean/Variance**: Welford's online algorithm. A single pass, O(1)
//!   memory, and no `E[X²] − (E[X])²` cancellation.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Summation**: Kahan compensated summation. The running compensation
//!   term recovers the low-order bits each addition would otherwise drop.
//!   Reference: Kahan (1965), "Further Remarks on Reducing Truncation
//!   Errors", *Communications of the ACM* 8(1).
//! - **Quantile**: R-7 linear interpolation on pre-sorted data.
//!   Reference: Hyndman & Fan (1996), *The American Statistician* 50(4).

use crate::error::{NumericError, Result};

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for the mean and sample variance.
///
/// State is the triple `(count, mean, M₂)` where `M₂` is the running sum
/// of squared deviations from the current mean. `M₂` never goes negative:
/// each update adds `delta × delta2`, and both factors share a sign.
///
/// The accumulator has no interior locking. To accumulate from several
/// threads, give each thread its own instance and combine them with
/// [`merge`](Self::merge).
///
/// # Examples
/// ```
/// use u_numstable::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for x in 1..=10 {
///     acc.update(x as f64);
/// }
/// assert_eq!(acc.count(), 10);
/// assert_eq!(acc.mean(), 5.5);
/// assert!((acc.variance().unwrap() - 55.0 / 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WelfordAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates an accumulator with no observations.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Incorporates one observation.
    ///
    /// `delta2` is taken against the *updated* mean; pairing it with the
    /// pre-update `delta` is what keeps `M₂` stable.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    /// Returns the number of observations seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, `0.0` when no observations were recorded.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sample variance (n − 1 denominator).
    ///
    /// # Errors
    /// [`NumericError::InsufficientData`] when fewer than 2 observations
    /// have been recorded.
    pub fn variance(&self) -> Result<f64> {
        self.require(2)?;
        Ok(self.m2 / (self.count - 1) as f64)
    }

    /// Returns the sample standard deviation, `sqrt(variance())`.
    ///
    /// # Errors
    /// Same as [`variance`](Self::variance).
    pub fn std(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Returns the population variance (n denominator).
    ///
    /// # Errors
    /// [`NumericError::InsufficientData`] when no observations have been
    /// recorded.
    pub fn population_variance(&self) -> Result<f64> {
        self.require(1)?;
        Ok(self.m2 / self.count as f64)
    }

    /// Returns the accumulator to its zeroed initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Folds another accumulator into this one.
    ///
    /// The result matches feeding both observation streams into a single
    /// accumulator, up to rounding.
    ///
    /// Reference: Chan, Golub & LeVeque (1979), "Updating Formulae and a
    /// Pairwise Algorithm for Computing Sample Variances".
    pub fn merge(&mut self, other: &WelfordAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let total = self.count + other.count;
        let n = total as f64;
        let delta = other.mean - self.mean;

        self.mean += delta * (nb / n);
        self.m2 += other.m2 + delta * delta * na * nb / n;
        self.count = total;
    }

    fn require(&self, required: u64) -> Result<()> {
        if self.count < required {
            Err(NumericError::InsufficientData {
                required,
                actual: self.count,
            })
        } else {
            Ok(())
        }
    }
}

impl Default for WelfordAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<f64> for WelfordAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for WelfordAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Running Kahan sum.
///
/// # Examples
/// ```
/// use u_numstable::stats::KahanSum;
/// let mut s = KahanSum::new();
/// s.add(1e16);
/// for _ in 0..10_000 {
///     s.add(1.0);
/// }
/// assert_eq!(s.value(), 1e16 + 10_000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// Creates a sum of zero with no pending compensation.
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// Adds one term, carrying the rounding error into the next step.
    #[inline]
    pub fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Returns the compensated sum of all terms added so far.
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }

    /// Clears the sum and the compensation term.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Extend<f64> for KahanSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<f64> for KahanSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

/// Sums `data` with Kahan compensated summation.
///
/// For inputs mixing one huge magnitude with many small increments the
/// result tracks the exact sum where naive left-to-right addition drops
/// every increment.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_numstable::stats::kahan_sum;
/// let v = [0.1; 10];
/// assert!((kahan_sum(&v) - 1.0).abs() < 1e-15);
/// assert_eq!(kahan_sum(&[]), 0.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    data.iter().copied().collect::<KahanSum>().value()
}

// ---------------------------------------------------------------------------
// Quantiles
// ---------------------------------------------------------------------------

/// Computes the `p`-th quantile on **pre-sorted** data (R-7 method).
///
/// For sorted `x[0..n]`: `h = (n − 1) × p`, `j = ⌊h⌋`, `g = h − j`, and
/// the result is `(1 − g) × x[j] + g × x[j+1]`. This is the default
/// percentile rule of R and NumPy.
///
/// The caller must guarantee that `sorted_data` is in non-decreasing order.
///
/// # Returns
/// - `None` if `sorted_data` is empty or `p` is outside `[0, 1]`.
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    let n = sorted_data.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_data[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted_data[n - 1])
    } else {
        Some((1.0 - g) * sorted_data[j] + g * sorted_data[j + 1])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(
            prop::num::f64::NORMAL.prop_filter("finite", |x| x.is_finite() && x.abs() < 1e12),
            min_len..=max_len,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn variance_non_negative(data in finite_vec(2, 100)) {
            let acc: WelfordAccumulator = data.iter().copied().collect();
            let var = acc.variance().unwrap();
            prop_assert!(var >= 0.0, "variance must be >= 0, got {}", var);
        }

        #[test]
        fn std_is_sqrt_of_variance(data in finite_vec(2, 100)) {
            let acc: WelfordAccumulator = data.iter().copied().collect();
            prop_assert_eq!(acc.std().unwrap(), acc.variance().unwrap().sqrt());
        }

        #[test]
        fn mean_of_constant_is_exact(
            value in -1e6_f64..1e6,
            n in 1_usize..50,
        ) {
            let acc: WelfordAccumulator = std::iter::repeat(value).take(n).collect();
            prop_assert_eq!(acc.mean(), value);
        }

        #[test]
        fn merge_equals_sequential(
            data_a in finite_vec(1, 50),
            data_b in finite_vec(1, 50),
        ) {
            let sequential: WelfordAccumulator =
                data_a.iter().chain(data_b.iter()).copied().collect();

            let mut acc_a: WelfordAccumulator = data_a.iter().copied().collect();
            let acc_b: WelfordAccumulator = data_b.iter().copied().collect();
            acc_a.merge(&acc_b);

            prop_assert_eq!(acc_a.count(), sequential.count());
            prop_assert!(
                (acc_a.mean() - sequential.mean()).abs() < 1e-10 * sequential.mean().abs().max(1.0),
                "merged mean should match sequential"
            );
            let seq_var = sequential.variance().unwrap();
            let mrg_var = acc_a.variance().unwrap();
            prop_assert!(
                (seq_var - mrg_var).abs() < 1e-8 * seq_var.max(1.0),
                "merged variance should match sequential"
            );
        }

        #[test]
        fn kahan_error_bounded_by_magnitude(
            big in 1e14_f64..1e17,
            small in proptest::collection::vec(0.0_f64..10.0, 1..500),
        ) {
            let mut data = vec![big];
            data.extend_from_slice(&small);
            // Small terms first, so only the final addition rounds at scale.
            let reference = big + small.iter().copied().collect::<KahanSum>().value();
            let kahan = kahan_sum(&data);
            // All terms are non-negative, so Σ|x| = S and the Kahan bound is ~2εS.
            prop_assert!(
                (kahan - reference).abs() <= 4.0 * f64::EPSILON * reference,
                "kahan={} reference={}", kahan, reference
            );
        }
    }
}
