//! # u-numstable
//!
//! Numerically stable statistical primitives.
//!
//! Building blocks for numeric and statistical pipelines that sidestep the
//! classic failure modes of naive floating-point code: catastrophic
//! cancellation in variance, overflow and underflow in exponentials, and
//! rounding drift in long sums.
//!
//! ## Modules
//!
//! - [`stats`] — Welford mean/variance accumulator, Kahan summation, R-7 quantile
//! - [`numerical`] — log-sum-exp, softmax, tolerance-aware float comparison
//! - [`resample`] — percentile bootstrap confidence intervals
//! - [`random`] — seeded RNG, shuffling, resampling indices, normal variates
//! - [`timing`] — scope timer that reports through `log`
//! - [`error`] — [`NumericError`] and the crate [`Result`] alias
//!
//! ## Design Philosophy
//!
//! - **Defined values over errors**: empty log-sum-exp is `−∞`, NaN never
//!   compares equal. Only real precondition violations, such as a variance
//!   from fewer than two observations, return `Err`.
//! - **No hidden state**: every function works on caller-owned data; the
//!   sequence functions do not allocate.
//! - **Property-based testing**: mathematical invariants verified via proptest

pub mod error;
pub mod numerical;
pub mod random;
pub mod resample;
pub mod stats;
pub mod timing;

pub use error::{NumericError, Result};
pub use numerical::{
    approx_equal, approx_equal_default, log_sum_exp, log_sum_exp_n, softmax, softmax_inplace,
    Tolerance,
};
pub use stats::{kahan_sum, KahanSum, WelfordAccumulator};
