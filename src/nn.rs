//! Element-wise and reduction operations used by neural-network layers
//!
//! Functions with a destination take it first, as in [`crate::ops`].
//! Functions without one mutate their only argument in place.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::ops::zip_into;
use crate::{Matrix, MatrizError, Result};

/// Hadamard (element-wise) product: `result[i, j] = a[i, j] * b[i, j]`
///
/// # Errors
///
/// Returns `ShapeMismatch` if `a` and `b` differ in shape or `result`
/// does not match them
///
/// # Example
///
/// ```
/// use matriz::{nn, Matrix};
///
/// let a = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
/// let b = Matrix::from_vec(1, 3, vec![4.0, 5.0, 6.0]).unwrap();
/// let mut c = Matrix::zeros(1, 3).unwrap();
/// nn::hadamard_product(&mut c, &a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[4.0, 10.0, 18.0]);
/// ```
pub fn hadamard_product(result: &mut Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    zip_into("hadamard_product", result, a, b, |x, y| x * y)
}

/// Tiles `original` across a `new_rows × new_cols` grid
///
/// `result[i, j] = original[i % rows, j % cols]`. The new dimensions must be
/// integer multiples of the original ones.
///
/// # Errors
///
/// Returns `InvalidInput` if either new dimension is not a multiple of the
/// original, and `ShapeMismatch` if `result` is not `new_rows × new_cols`
///
/// # Example
///
/// ```
/// use matriz::{nn, Matrix};
///
/// let row = Matrix::from_vec(1, 2, vec![1.0, 2.0]).unwrap();
/// let mut tiled = Matrix::zeros(2, 4).unwrap();
/// nn::broadcast(&mut tiled, &row, 2, 4).unwrap();
/// assert_eq!(tiled.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(result, original), fields(from = %format!("{}x{}", original.rows(), original.cols()))))]
pub fn broadcast(
    result: &mut Matrix,
    original: &Matrix,
    new_rows: usize,
    new_cols: usize,
) -> Result<()> {
    let (rows, cols) = original.shape();
    if rows == 0
        || cols == 0
        || new_rows == 0
        || new_cols == 0
        || new_rows % rows != 0
        || new_cols % cols != 0
    {
        return Err(MatrizError::InvalidInput(format!(
            "Broadcast target {}x{} is not a multiple of {}x{}",
            new_rows, new_cols, rows, cols
        )));
    }
    result.ensure_shape("broadcast", (new_rows, new_cols))?;

    let src = original.as_slice();
    for (i, out_row) in result.as_mut_slice().chunks_mut(new_cols).enumerate() {
        let src_row = &src[(i % rows) * cols..(i % rows + 1) * cols];
        for (out, &value) in out_row.iter_mut().zip(src_row.iter().cycle()) {
            *out = value;
        }
    }

    Ok(())
}

/// Multiplies every element by `scalar` in place
pub fn scalar_multiply(matrix: &mut Matrix, scalar: f32) {
    for value in matrix.as_mut_slice() {
        *value *= scalar;
    }
}

/// Sums every element with an `f32` accumulator
///
/// ```
/// use matriz::{nn, Matrix};
///
/// let m = Matrix::filled(2, 2, 3.0).unwrap();
/// assert_eq!(nn::sum_all_elements(&m), 12.0);
/// ```
pub fn sum_all_elements(matrix: &Matrix) -> f32 {
    let mut total = 0.0f32;
    for &value in matrix.as_slice() {
        total += value;
    }
    total
}

/// Raises every element to `exponent` in place
///
/// Follows [`f32::powf`]: a negative base with a fractional exponent gives NaN.
pub fn power(matrix: &mut Matrix, exponent: f32) {
    for value in matrix.as_mut_slice() {
        *value = value.powf(exponent);
    }
}

/// Element-wise absolute value: `result[i, j] = |original[i, j]|`
///
/// # Errors
///
/// Returns `ShapeMismatch` if `result` and `original` differ in shape
pub fn absolute(result: &mut Matrix, original: &Matrix) -> Result<()> {
    result.ensure_shape("absolute", original.shape())?;
    for (out, &value) in result.as_mut_slice().iter_mut().zip(original.as_slice()) {
        *out = value.abs();
    }
    Ok(())
}

/// Column sums of `src`, written to every row of `dest`
///
/// `dest` may have any number of rows; each one receives the same
/// `1 × cols` reduction.
///
/// # Errors
///
/// Returns `InvalidInput` if `dest.cols() != src.cols()`
///
/// # Example
///
/// ```
/// use matriz::{nn, Matrix};
///
/// let src = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let mut dest = Matrix::zeros(3, 2).unwrap();
/// nn::sum_columns(&mut dest, &src).unwrap();
/// assert_eq!(dest.as_slice(), &[4.0, 6.0, 4.0, 6.0, 4.0, 6.0]);
/// ```
pub fn sum_columns(dest: &mut Matrix, src: &Matrix) -> Result<()> {
    if dest.cols() != src.cols() {
        return Err(MatrizError::InvalidInput(format!(
            "Destination has {} columns, source has {}",
            dest.cols(),
            src.cols()
        )));
    }

    if src.is_empty() {
        return Err(MatrizError::InvalidDimensions {
            rows: src.rows(),
            cols: src.cols(),
        });
    }

    let cols = src.cols();
    let mut sums = vec![0.0f32; cols];
    for row in src.as_slice().chunks(cols) {
        for (sum, &value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }
    for row in dest.as_mut_slice().chunks_mut(cols) {
        row.copy_from_slice(&sums);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, data: &[f32]) -> Matrix {
        Matrix::from_slice(rows, cols, data).unwrap()
    }

    #[test]
    fn test_hadamard_basic() {
        let a = m(2, 2, &[1.0, -2.0, 3.0, 0.5]);
        let b = m(2, 2, &[2.0, 2.0, -1.0, 4.0]);
        let mut c = Matrix::zeros(2, 2).unwrap();
        hadamard_product(&mut c, &a, &b).unwrap();
        assert_eq!(c.as_slice(), &[2.0, -4.0, -3.0, 2.0]);
    }

    #[test]
    fn test_hadamard_mismatch() {
        let a = Matrix::zeros(2, 2).unwrap();
        let b = Matrix::zeros(2, 1).unwrap();
        let mut c = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(
            hadamard_product(&mut c, &a, &b),
            Err(MatrizError::ShapeMismatch { op: "hadamard_product", .. })
        ));
    }

    #[test]
    fn test_broadcast_row() {
        let a = m(1, 2, &[1.0, 2.0]);
        let mut out = Matrix::zeros(2, 4).unwrap();
        broadcast(&mut out, &a, 2, 4).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_broadcast_block() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut out = Matrix::zeros(4, 2).unwrap();
        broadcast(&mut out, &a, 4, 2).unwrap();
        assert_eq!(
            out.as_slice(),
            &[1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_broadcast_same_size_is_copy() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut out = Matrix::zeros(2, 3).unwrap();
        broadcast(&mut out, &a, 2, 3).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_broadcast_not_multiple() {
        let a = Matrix::zeros(2, 2).unwrap();
        let mut out = Matrix::zeros(3, 4).unwrap();
        assert!(matches!(
            broadcast(&mut out, &a, 3, 4),
            Err(MatrizError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_broadcast_destination_mismatch() {
        let a = Matrix::zeros(1, 2).unwrap();
        let mut out = Matrix::zeros(2, 2).unwrap();
        assert_eq!(
            broadcast(&mut out, &a, 2, 4),
            Err(MatrizError::ShapeMismatch {
                op: "broadcast",
                expected: (2, 4),
                actual: (2, 2),
            })
        );
    }

    #[test]
    fn test_scalar_multiply() {
        let mut a = m(1, 3, &[1.0, -2.0, 0.0]);
        scalar_multiply(&mut a, -3.0);
        assert_eq!(a.as_slice(), &[-3.0, 6.0, -0.0]);
    }

    #[test]
    fn test_sum_all_elements() {
        let a = Matrix::filled(2, 2, 3.0).unwrap();
        assert_eq!(sum_all_elements(&a), 12.0);
        let b = m(2, 3, &[1.0, 2.0, 3.0, -4.0, -5.0, 6.0]);
        assert_eq!(sum_all_elements(&b), 3.0);
    }

    fn assert_close(actual: &[f32], expected: &[f32]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{a} != {e}");
        }
    }

    #[test]
    fn test_power() {
        let mut a = m(1, 4, &[2.0, 3.0, 4.0, 9.0]);
        power(&mut a, 2.0);
        assert_close(a.as_slice(), &[4.0, 9.0, 16.0, 81.0]);

        let mut b = m(1, 2, &[4.0, 16.0]);
        power(&mut b, 0.5);
        assert_close(b.as_slice(), &[2.0, 4.0]);

        let mut c = m(1, 2, &[2.0, 4.0]);
        power(&mut c, -1.0);
        assert_close(c.as_slice(), &[0.5, 0.25]);
    }

    #[test]
    fn test_power_negative_base_fractional_is_nan() {
        let mut a = m(1, 1, &[-4.0]);
        power(&mut a, 0.5);
        assert!(a[(0, 0)].is_nan());
    }

    #[test]
    fn test_absolute() {
        let a = m(2, 2, &[-1.0, 2.0, -3.5, 0.0]);
        let mut out = Matrix::zeros(2, 2).unwrap();
        absolute(&mut out, &a).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 2.0, 3.5, 0.0]);
    }

    #[test]
    fn test_absolute_mismatch() {
        let a = Matrix::zeros(2, 2).unwrap();
        let mut out = Matrix::zeros(4, 1).unwrap();
        assert!(absolute(&mut out, &a).is_err());
    }

    #[test]
    fn test_sum_columns_broadcasts_to_dest_rows() {
        let src = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut dest = Matrix::filled(3, 2, -7.0).unwrap();
        sum_columns(&mut dest, &src).unwrap();
        for row in 0..3 {
            assert_eq!(dest[(row, 0)], 4.0);
            assert_eq!(dest[(row, 1)], 6.0);
        }
    }

    #[test]
    fn test_sum_columns_single_row_dest() {
        let src = m(3, 2, &[1.0, 10.0, 2.0, 20.0, 3.0, 30.0]);
        let mut dest = Matrix::zeros(1, 2).unwrap();
        sum_columns(&mut dest, &src).unwrap();
        assert_eq!(dest.as_slice(), &[6.0, 60.0]);
    }

    #[test]
    fn test_sum_columns_mismatch() {
        let src = Matrix::zeros(2, 3).unwrap();
        let mut dest = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(
            sum_columns(&mut dest, &src),
            Err(MatrizError::InvalidInput(_))
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every tile of a broadcast equals the source
        #[test]
        fn test_broadcast_tiles(
            rows in 1usize..5,
            cols in 1usize..5,
            row_reps in 1usize..4,
            col_reps in 1usize..4,
            data in proptest::collection::vec(-10.0f32..10.0, 16)
        ) {
            let src = Matrix::from_slice(rows, cols, &data[..rows * cols]).unwrap();
            let (new_rows, new_cols) = (rows * row_reps, cols * col_reps);
            let mut out = Matrix::zeros(new_rows, new_cols).unwrap();
            broadcast(&mut out, &src, new_rows, new_cols).unwrap();

            for i in 0..new_rows {
                for j in 0..new_cols {
                    prop_assert_eq!(out[(i, j)], src[(i % rows, j % cols)]);
                }
            }
        }

        /// sum_columns rows add up to sum_all_elements
        #[test]
        fn test_sum_columns_consistent_with_total(
            data in proptest::collection::vec(-10.0f32..10.0, 12)
        ) {
            let src = Matrix::from_vec(4, 3, data).unwrap();
            let mut dest = Matrix::zeros(2, 3).unwrap();
            sum_columns(&mut dest, &src).unwrap();
            let row_total: f32 = dest.as_slice()[..3].iter().sum();
            prop_assert!((row_total - sum_all_elements(&src)).abs() < 1e-3);
        }
    }
}
