//! Building matrices from larger in-memory datasets
//!
//! A window of `desired_rows × desired_cols` is cut out of the source,
//! starting `step` rows down and `stride` columns across:
//!
//! ```text
//! output[i, j] = source[i + step, j + stride]
//! ```

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Matrix, MatrizError, Result};

/// Extracts a window from a rectangular 2D source
///
/// `data` is any slice of equally long rows (`Vec<Vec<f32>>`, `&[[f32; N]]`, ...).
///
/// # Errors
///
/// Returns `InvalidInput` if `data` is empty or ragged, or if
/// `desired_rows + step` exceeds the row count or `desired_cols + stride`
/// exceeds the column count. Returns `InvalidDimensions` if a desired
/// dimension is zero.
///
/// # Example
///
/// ```
/// use matriz::preprocess::extract_window;
///
/// let data = vec![
///     vec![1.0, 2.0, 3.0],
///     vec![4.0, 5.0, 6.0],
///     vec![7.0, 8.0, 9.0],
/// ];
/// let m = extract_window(2, 2, 1, 0, &data).unwrap();
/// assert_eq!(m.as_slice(), &[2.0, 3.0, 5.0, 6.0]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(data), fields(source_rows = data.len())))]
pub fn extract_window<S: AsRef<[f32]>>(
    desired_rows: usize,
    desired_cols: usize,
    stride: usize,
    step: usize,
    data: &[S],
) -> Result<Matrix> {
    let total_rows = data.len();
    let total_cols = match data.first() {
        Some(row) => row.as_ref().len(),
        None => {
            return Err(MatrizError::InvalidInput(
                "Source data has no rows".to_string(),
            ))
        }
    };
    if let Some((index, row)) = data
        .iter()
        .enumerate()
        .find(|(_, row)| row.as_ref().len() != total_cols)
    {
        return Err(MatrizError::InvalidInput(format!(
            "Source row {} has {} columns, expected {}",
            index,
            row.as_ref().len(),
            total_cols
        )));
    }

    check_window(desired_rows, desired_cols, stride, step, total_rows, total_cols)?;
    let mut result = Matrix::zeros(desired_rows, desired_cols)?;
    copy_window(&mut result, stride, step, total_rows, total_cols, |row, col| {
        data[row].as_ref()[col]
    });
    Ok(result)
}

/// Extracts a window from a flat row-major source of `total_rows × total_cols`
///
/// # Errors
///
/// Same window checks as [`extract_window`], plus `InvalidInput` if
/// `data` holds fewer than `total_rows * total_cols` values.
///
/// # Example
///
/// ```
/// use matriz::preprocess::extract_window_flat;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
/// let m = extract_window_flat(3, 3, 2, 3, 0, 1, &data).unwrap();
/// assert_eq!(m.as_slice(), &[4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(data), fields(len = data.len())))]
pub fn extract_window_flat(
    total_cols: usize,
    total_rows: usize,
    desired_rows: usize,
    desired_cols: usize,
    stride: usize,
    step: usize,
    data: &[f32],
) -> Result<Matrix> {
    let required = total_rows.saturating_mul(total_cols);
    if data.len() < required {
        return Err(MatrizError::InvalidInput(format!(
            "Source holds {} values, {}x{} requires {}",
            data.len(),
            total_rows,
            total_cols,
            required
        )));
    }

    check_window(desired_rows, desired_cols, stride, step, total_rows, total_cols)?;
    let mut result = Matrix::zeros(desired_rows, desired_cols)?;
    copy_window(&mut result, stride, step, total_rows, total_cols, |row, col| {
        data[row * total_cols + col]
    });
    Ok(result)
}

fn check_window(
    desired_rows: usize,
    desired_cols: usize,
    stride: usize,
    step: usize,
    total_rows: usize,
    total_cols: usize,
) -> Result<()> {
    let row_end = desired_rows.checked_add(step);
    let col_end = desired_cols.checked_add(stride);
    match (row_end, col_end) {
        (Some(r), Some(c)) if r <= total_rows && c <= total_cols => Ok(()),
        _ => Err(MatrizError::InvalidInput(format!(
            "Window {}x{} at row {} column {} exceeds source {}x{}",
            desired_rows, desired_cols, step, stride, total_rows, total_cols
        ))),
    }
}

/// Rows past the end of the source stay zero, columns past it are zero-padded.
fn copy_window<F>(
    result: &mut Matrix,
    stride: usize,
    step: usize,
    total_rows: usize,
    total_cols: usize,
    source: F,
) where
    F: Fn(usize, usize) -> f32,
{
    let desired_cols = result.cols();
    let available_rows = total_rows.saturating_sub(step).min(result.rows());

    for i in 0..available_rows {
        let base_row = i + step;
        for j in 0..desired_cols {
            let col = j + stride;
            result[(i, j)] = if col < total_cols {
                source(base_row, col)
            } else {
                0.0
            };
        }
    }
}
