//! Seeded random number generation and shuffling.
//!
//! # Reproducibility
//!
//! Every routine takes the generator explicitly; nothing touches a global
//! or thread-local RNG. Build one with [`create_rng`] and a fixed seed to
//! make a bootstrap run or a shuffled permutation repeatable. The underlying
//! algorithm (SmallRng) is deterministic for a given seed on the same
//! platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use u_numstable::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

// ============================================================================
// Tests
// ============================================================================
