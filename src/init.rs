//! Random weight initialization
//!
//! Both schemes draw from a caller-supplied [`Rng`], so a seeded generator
//! gives reproducible weights. The `_from_entropy` variants seed a fresh
//! [`StdRng`] from the operating system on every call.
//!
//! - [`randomize`]: U(-range, range)
//! - [`xavier_uniform`]: U(-a, a) with a = sqrt(6 / (rows + cols)) (Glorot & Bengio, 2010)
//!
//! # Example
//!
//! ```
//! use matriz::{init, Matrix};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut weights = Matrix::zeros(4, 8).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! init::xavier_uniform(&mut weights, &mut rng);
//!
//! let limit = (6.0f32 / 12.0).sqrt();
//! assert!(weights.as_slice().iter().all(|w| w.abs() <= limit));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Matrix, MatrizError, Result};

/// Half-width used by [`randomize`] when the caller has no preference
pub const DEFAULT_RANDOMIZE_RANGE: f32 = 3.0;

/// Largest half-width [`randomize`] accepts
///
/// The sampler scales the interval width `2 * range` slightly upward, so the
/// bound leaves headroom below `f32::MAX / 2`.
pub const MAX_RANDOMIZE_RANGE: f32 = f32::MAX / 4.0;

/// Fills `matrix` with samples from the closed interval `[-range, range]`
///
/// # Errors
///
/// Returns `InvalidInput` if `range` is negative, NaN, or larger than
/// [`MAX_RANDOMIZE_RANGE`]
#[cfg_attr(feature = "tracing", instrument(skip(matrix, rng), fields(dims = %format!("{}x{}", matrix.rows(), matrix.cols()))))]
pub fn randomize<R: Rng + ?Sized>(matrix: &mut Matrix, range: f32, rng: &mut R) -> Result<()> {
    if !(0.0..=MAX_RANDOMIZE_RANGE).contains(&range) {
        return Err(MatrizError::InvalidInput(format!(
            "Random range must be in [0, {}], got {}",
            MAX_RANDOMIZE_RANGE, range
        )));
    }
    fill_uniform(matrix, range, rng);
    Ok(())
}

/// [`randomize`] with a freshly entropy-seeded generator
///
/// # Errors
///
/// Same as [`randomize`]
pub fn randomize_from_entropy(matrix: &mut Matrix, range: f32) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    randomize(matrix, range, &mut rng)
}

/// Xavier/Glorot uniform initialization
///
/// Samples from `[-a, a]` where `a = sqrt(6 / (rows + cols))`. Suitable for
/// tanh and sigmoid activations. The empty placeholder is left untouched.
#[cfg_attr(feature = "tracing", instrument(skip(matrix, rng), fields(dims = %format!("{}x{}", matrix.rows(), matrix.cols()))))]
pub fn xavier_uniform<R: Rng + ?Sized>(matrix: &mut Matrix, rng: &mut R) {
    if matrix.is_empty() {
        return;
    }
    let limit = xavier_limit(matrix.rows(), matrix.cols());
    fill_uniform(matrix, limit, rng);
}

/// [`xavier_uniform`] with a freshly entropy-seeded generator
pub fn xavier_uniform_from_entropy(matrix: &mut Matrix) {
    let mut rng = StdRng::from_entropy();
    xavier_uniform(matrix, &mut rng);
}

/// `sqrt(6 / (rows + cols))`
pub fn xavier_limit(rows: usize, cols: usize) -> f32 {
    (6.0 / (rows + cols) as f32).sqrt()
}

fn fill_uniform<R: Rng + ?Sized>(matrix: &mut Matrix, half_width: f32, rng: &mut R) {
    for value in matrix.as_mut_slice() {
        *value = rng.gen_range(-half_width..=half_width);
    }
}
