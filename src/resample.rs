//! Bootstrap confidence intervals.
//!
//! # Algorithm
//!
//! Percentile bootstrap: draw `B` resamples of the data with replacement,
//! evaluate the statistic on each, and read the interval off the empirical
//! distribution of those `B` values at `α/2` and `1 − α/2` (R-7
//! interpolation, see [`quantile_sorted`]).
//!
//! Reference: Efron & Tibshirani (1993), *An Introduction to the
//! Bootstrap*, Chapter 13.

use log::debug;
use rand::Rng;

use crate::error::{NumericError, Result};
use crate::random::create_rng;
use crate::stats::quantile_sorted;

/// Settings for [`bootstrap_ci`].
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resamples `B`.
    pub n_resamples: usize,
    /// Two-sided confidence level, strictly between 0 and 1.
    pub confidence: f64,
    /// Seed for the resampling generator.
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_resamples: 1000,
            confidence: 0.95,
            seed: 42,
        }
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<()> {
        if self.n_resamples == 0 {
            return Err(NumericError::InvalidParameter(
                "n_resamples must be at least 1".into(),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(NumericError::InvalidParameter(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Percentile bootstrap confidence interval for `statistic` over `data`.
///
/// Returns `(lower, upper)` with `lower <= upper`.
///
/// # Errors
/// - [`NumericError::EmptyInput`] if `data` is empty.
/// - [`NumericError::InvalidParameter`] if `config.n_resamples == 0` or
///   `config.confidence` is outside `(0, 1)`.
/// - [`NumericError::NonFinite`] if `statistic` returns NaN on a resample.
///
/// # Examples
/// ```
/// use u_numstable::resample::{bootstrap_ci, BootstrapConfig};
/// use u_numstable::stats::kahan_sum;
///
/// let data: Vec<f64> = (1..=20).map(f64::from).collect();
/// let mean = |s: &[f64]| kahan_sum(s) / s.len() as f64;
/// let (lo, hi) = bootstrap_ci(&data, mean, &BootstrapConfig::default()).unwrap();
/// assert!(lo < 10.5 && 10.5 < hi);
/// ```
pub fn bootstrap_ci<F>(data: &[f64], mut statistic: F, config: &BootstrapConfig) -> Result<(f64, f64)>
where
    F: FnMut(&[f64]) -> f64,
{
    if data.is_empty() {
        return Err(NumericError::EmptyInput);
    }
    config.validate()?;

    debug!(
        "bootstrap: n={}, resamples={}, confidence={}, seed={}",
        data.len(),
        config.n_resamples,
        config.confidence,
        config.seed
    );

    let mut rng = create_rng(config.seed);
    let mut sample = vec![0.0; data.len()];
    let mut estimates = Vec::with_capacity(config.n_resamples);
    for _ in 0..config.n_resamples {
        for slot in sample.iter_mut() {
            *slot = data[rng.random_range(0..data.len())];
        }
        let value = statistic(&sample);
        if value.is_nan() {
            return Err(NumericError::NonFinite);
        }
        estimates.push(value);
    }
    estimates.sort_unstable_by(f64::total_cmp);

    let alpha = 1.0 - config.confidence;
    let lower = quantile_sorted(&estimates, alpha / 2.0).ok_or(NumericError::NonFinite)?;
    let upper = quantile_sorted(&estimates, 1.0 - alpha / 2.0).ok_or(NumericError::NonFinite)?;

    debug!("bootstrap: interval=({lower}, {upper})");
    Ok((lower, upper))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::stats::kahan_sum;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn ci_within_data_range_for_mean(
            data in proptest::collection::vec(-1e6_f64..1e6, 1..60),
            seed in 0_u64..1000,
        ) {
            let config = BootstrapConfig { n_resamples: 100, seed, ..BootstrapConfig::default() };
            let (lo, hi) = bootstrap_ci(&data, |s| kahan_sum(s) / s.len() as f64, &config).unwrap();
            let min = data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let slack = 1e-9 * max.abs().max(min.abs()).max(1.0);
            prop_assert!(lo <= hi);
            prop_assert!(lo >= min - slack && hi <= max + slack, "({}, {}) outside [{}, {}]", lo, hi, min, max);
        }
    }
}
