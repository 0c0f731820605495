//! Core linear-algebra operations
//!
//! Every function writes into a caller-supplied destination, which is
//! always the first argument. Shapes are validated before the destination
//! is touched.
//!
//! # Destination aliasing
//!
//! The destination is borrowed mutably and the operands immutably, so a
//! destination can never also be an operand. This holds for every
//! operation, [`transpose`] included:
//!
//! ```compile_fail,E0502
//! use matriz::{ops, Matrix};
//!
//! let mut a = Matrix::zeros(2, 2).unwrap();
//! let b = Matrix::zeros(2, 2).unwrap();
//! ops::multiply(&mut a, &a, &b).unwrap();
//! ```
//!
//! ```compile_fail,E0502
//! use matriz::{ops, Matrix};
//!
//! let mut a = Matrix::zeros(3, 3).unwrap();
//! ops::transpose(&mut a, &a).unwrap();
//! ```

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Matrix, MatrizError, Result};

fn check_inner_dimensions(first: &Matrix, second: &Matrix) -> Result<()> {
    if first.cols() != second.rows() {
        return Err(MatrizError::InvalidInput(format!(
            "Matrix dimension mismatch for multiplication: {}×{} × {}×{} (inner dimensions {} and {} must match)",
            first.rows(),
            first.cols(),
            second.rows(),
            second.cols(),
            first.cols(),
            second.rows()
        )));
    }
    Ok(())
}

fn check_same_shape(op: &'static str, first: &Matrix, second: &Matrix) -> Result<()> {
    second.ensure_shape(op, first.shape())
}

/// Matrix multiplication: `result = first × second`
///
/// `first` is `m×n`, `second` is `n×p` and `result` must be `m×p`. Each
/// output cell is accumulated in a fresh `f32` sum.
///
/// # Errors
///
/// Returns `InvalidInput` if `first.cols() != second.rows()` and
/// `ShapeMismatch` if `result` is not `first.rows() × second.cols()`
///
/// # Example
///
/// ```
/// use matriz::{ops, Matrix};
///
/// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
/// let mut c = ops::auto_create(&a, &b).unwrap();
/// ops::multiply(&mut c, &a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(result, first, second), fields(dims = %format!("{}x{} @ {}x{}", first.rows(), first.cols(), second.rows(), second.cols()))))]
pub fn multiply(result: &mut Matrix, first: &Matrix, second: &Matrix) -> Result<()> {
    check_inner_dimensions(first, second)?;
    result.ensure_shape("multiply", (first.rows(), second.cols()))?;

    let n = first.cols();
    let p = second.cols();
    let a = first.as_slice();
    let b = second.as_slice();
    let out = result.as_mut_slice();

    for i in 0..first.rows() {
        let a_row = &a[i * n..(i + 1) * n];
        for j in 0..p {
            let mut sum = 0.0f32;
            for (k, &a_ik) in a_row.iter().enumerate() {
                sum += a_ik * b[k * p + j];
            }
            out[i * p + j] = sum;
        }
    }

    Ok(())
}

/// Allocates a zeroed destination sized for `first × second`
///
/// # Errors
///
/// Returns `InvalidInput` if `first.cols() != second.rows()`
///
/// # Example
///
/// ```
/// use matriz::{ops, Matrix};
///
/// let a = Matrix::zeros(4, 3).unwrap();
/// let b = Matrix::zeros(3, 7).unwrap();
/// assert_eq!(ops::auto_create(&a, &b).unwrap().shape(), (4, 7));
/// ```
pub fn auto_create(first: &Matrix, second: &Matrix) -> Result<Matrix> {
    check_inner_dimensions(first, second)?;
    Matrix::zeros(first.rows(), second.cols())
}

/// Element-wise addition: `result = first + second`
///
/// # Errors
///
/// Returns `ShapeMismatch` if the operands differ in shape or `result`
/// does not match them
pub fn add(result: &mut Matrix, first: &Matrix, second: &Matrix) -> Result<()> {
    zip_into("add", result, first, second, |x, y| x + y)
}

/// Element-wise subtraction: `result = first - second`
///
/// # Errors
///
/// Returns `ShapeMismatch` if the operands differ in shape or `result`
/// does not match them
pub fn subtract(result: &mut Matrix, first: &Matrix, second: &Matrix) -> Result<()> {
    zip_into("subtract", result, first, second, |x, y| x - y)
}

/// Shared kernel for same-shape binary element-wise operations
pub(crate) fn zip_into<F>(
    op: &'static str,
    result: &mut Matrix,
    first: &Matrix,
    second: &Matrix,
    f: F,
) -> Result<()>
where
    F: Fn(f32, f32) -> f32,
{
    check_same_shape(op, first, second)?;
    result.ensure_shape(op, first.shape())?;

    for ((out, &x), &y) in result
        .as_mut_slice()
        .iter_mut()
        .zip(first.as_slice())
        .zip(second.as_slice())
    {
        *out = f(x, y);
    }

    Ok(())
}

/// Transpose: `result[j, i] = original[i, j]`
///
/// # Errors
///
/// Returns `ShapeMismatch` if `result` is not `original.cols() × original.rows()`
///
/// # Example
///
/// ```
/// use matriz::{ops, Matrix};
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let mut t = Matrix::zeros(3, 2).unwrap();
/// ops::transpose(&mut t, &m).unwrap();
///
/// // [[1, 2, 3],     [[1, 4],
/// //  [4, 5, 6]]  →   [2, 5],
/// //                  [3, 6]]
/// assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(result, original), fields(dims = %format!("{}x{}", original.rows(), original.cols()))))]
pub fn transpose(result: &mut Matrix, original: &Matrix) -> Result<()> {
    result.ensure_shape("transpose", (original.cols(), original.rows()))?;
    transpose_into(
        result.as_mut_slice(),
        original.as_slice(),
        original.rows(),
        original.cols(),
    );
    Ok(())
}

/// Block-wise transpose of a `rows × cols` buffer into `dst`
pub(crate) fn transpose_into(dst: &mut [f32], src: &[f32], rows: usize, cols: usize) {
    // 64x64 f32 blocks fit in L1
    const BLOCK_SIZE: usize = 64;

    for i_block in (0..rows).step_by(BLOCK_SIZE) {
        for j_block in (0..cols).step_by(BLOCK_SIZE) {
            let i_end = (i_block + BLOCK_SIZE).min(rows);
            let j_end = (j_block + BLOCK_SIZE).min(cols);

            for i in i_block..i_end {
                let src_row_start = i * cols;
                for j in j_block..j_end {
                    dst[j * rows + i] = src[src_row_start + j];
                }
            }
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
        proptest::collection::vec(-100.0f32..100.0, rows * cols)
            .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// (A × B)ᵀ = Bᵀ × Aᵀ
        #[test]
        fn test_transpose_of_product(
            a in matrix_strategy(3, 4),
            b in matrix_strategy(4, 5)
        ) {
            let mut ab = auto_create(&a, &b).unwrap();
            multiply(&mut ab, &a, &b).unwrap();
            let mut ab_t = Matrix::zeros(5, 3).unwrap();
            transpose(&mut ab_t, &ab).unwrap();

            let mut a_t = Matrix::zeros(4, 3).unwrap();
            let mut b_t = Matrix::zeros(5, 4).unwrap();
            transpose(&mut a_t, &a).unwrap();
            transpose(&mut b_t, &b).unwrap();
            let mut bt_at = auto_create(&b_t, &a_t).unwrap();
            multiply(&mut bt_at, &b_t, &a_t).unwrap();

            prop_assert_eq!(ab_t.shape(), bt_at.shape());
            for (x, y) in ab_t.as_slice().iter().zip(bt_at.as_slice()) {
                let tolerance = 1e-3f32.max(x.abs().max(y.abs()) * 1e-4);
                prop_assert!((x - y).abs() <= tolerance, "{} != {}", x, y);
            }
        }

        /// (A + B) - B = A
        #[test]
        fn test_add_subtract_inverse(
            a in matrix_strategy(4, 3),
            b in matrix_strategy(4, 3)
        ) {
            let mut sum = Matrix::zeros(4, 3).unwrap();
            add(&mut sum, &a, &b).unwrap();
            let mut back = Matrix::zeros(4, 3).unwrap();
            subtract(&mut back, &sum, &b).unwrap();

            for (x, y) in back.as_slice().iter().zip(a.as_slice()) {
                prop_assert!((x - y).abs() < 1e-4, "{} != {}", x, y);
            }
        }

        /// Transposing twice is the identity
        #[test]
        fn test_transpose_involution(
            rows in 1usize..20,
            cols in 1usize..20,
            seed in any::<u32>()
        ) {
            let data: Vec<f32> = (0..rows * cols)
                .map(|i| ((i as u32).wrapping_mul(seed) % 1000) as f32)
                .collect();
            let a = Matrix::from_vec(rows, cols, data).unwrap();
            let mut t = Matrix::zeros(cols, rows).unwrap();
            let mut tt = Matrix::zeros(rows, cols).unwrap();
            transpose(&mut t, &a).unwrap();
            transpose(&mut tt, &t).unwrap();
            prop_assert_eq!(tt, a);
        }
    }
}
