//! Dense matrix storage for matriz
//!
//! [`Matrix`] owns a contiguous row-major buffer of `f32` values. Copies are
//! always deep, and ownership transfer empties the source.
//!
//! # Example
//!
//! ```
//! use matriz::Matrix;
//!
//! // Create a 2x3 matrix
//! let m = Matrix::zeros(2, 3).unwrap();
//! assert_eq!(m.rows(), 2);
//! assert_eq!(m.cols(), 3);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::{ops, MatrizError, Result};

/// A 2D matrix of `f32` with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row.
///
/// # Storage Layout
///
/// For a 2x3 matrix:
/// ```text
/// [[a, b, c],
///  [d, e, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
///
/// A live matrix always has at least one row and one column. The only
/// zero-dimension value is the empty placeholder left behind by
/// [`Matrix::take`] (also produced by [`Default`]); it must not be indexed.
///
/// # Example
///
/// ```
/// use matriz::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m[(0, 0)], 1.0);
/// assert_eq!(m[(0, 1)], 2.0);
/// assert_eq!(m[(1, 0)], 3.0);
/// assert_eq!(m[(1, 1)], 4.0);
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a matrix filled with zeros
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if `rows` or `cols` is zero
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let m = Matrix::zeros(3, 3).unwrap();
    /// assert_eq!(m[(1, 1)], 0.0);
    /// assert!(Matrix::zeros(0, 3).is_err());
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, 0.0)
    }

    /// Creates a matrix with every element set to `value`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if `rows` or `cols` is zero
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let m = Matrix::filled(2, 2, 3.0).unwrap();
    /// assert_eq!(m.as_slice(), &[3.0, 3.0, 3.0, 3.0]);
    /// ```
    pub fn filled(rows: usize, cols: usize, value: f32) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![value; rows * cols],
        })
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if `rows` or `cols` is zero, and
    /// `InvalidInput` if `data.len() != rows * cols`
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m[(1, 2)], 6.0);
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        check_dimensions(rows, cols)?;
        if data.len() != rows * cols {
            return Err(MatrizError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {}x{} (expected {})",
                data.len(),
                rows,
                cols,
                rows * cols
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::from_vec`]
    pub fn from_slice(rows: usize, cols: usize, data: &[f32]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Returns the number of rows (0 for the empty placeholder)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns (0 for the empty placeholder)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for the empty placeholder left by an ownership transfer
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f32> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            self.data.get(row * self.cols + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f32> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            let idx = row * self.cols + col;
            self.data.get_mut(idx)
        }
    }

    /// Returns a reference to the underlying data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns a mutable reference to the underlying data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Overwrites this matrix with a deep copy of `source`
    ///
    /// The existing buffer is reused; this type never reshapes on assignment.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the shapes differ
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let src = Matrix::filled(2, 2, 7.0).unwrap();
    /// let mut dst = Matrix::zeros(2, 2).unwrap();
    /// dst.assign_copy(&src).unwrap();
    /// assert_eq!(dst, src);
    ///
    /// let mut wrong = Matrix::zeros(2, 3).unwrap();
    /// assert!(wrong.assign_copy(&src).is_err());
    /// ```
    pub fn assign_copy(&mut self, source: &Matrix) -> Result<()> {
        source.ensure_shape("assign_copy", self.shape())?;
        self.data.copy_from_slice(&source.data);
        Ok(())
    }

    /// Transfers ownership of the buffer out of this matrix
    ///
    /// The returned matrix owns the original buffer without copying it.
    /// `self` is left as the empty 0x0 placeholder.
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let mut a = Matrix::filled(2, 3, 1.0).unwrap();
    /// let b = a.take();
    /// assert_eq!(b.shape(), (2, 3));
    /// assert_eq!(a.shape(), (0, 0));
    /// assert!(a.is_empty());
    /// ```
    pub fn take(&mut self) -> Matrix {
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = self.rows, cols = self.cols, "matrix moved");
        std::mem::take(self)
    }

    /// Replaces this matrix by transferring the buffer out of `source`
    ///
    /// No shape match is required. The previous buffer is released and
    /// `source` becomes the empty placeholder.
    pub fn assign_transfer(&mut self, source: &mut Matrix) {
        *self = source.take();
    }

    /// Matrix multiplication into a freshly allocated result
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `self.cols() != other.rows()`
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    ///
    /// // [[1, 2],   [[5, 6],   [[19, 22],
    /// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = ops::auto_create(self, other)?;
        ops::multiply(&mut result, self, other)?;
        Ok(result)
    }

    /// Transpose into a freshly allocated result
    ///
    /// The empty placeholder transposes to another empty placeholder.
    ///
    /// # Example
    ///
    /// ```
    /// use matriz::Matrix;
    ///
    /// let m = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 1));
    /// ```
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix {
            rows: self.cols,
            cols: self.rows,
            data: vec![0.0; self.data.len()],
        };
        ops::transpose_into(&mut result.data, &self.data, self.rows, self.cols);
        result
    }

    /// Writes the row-by-row rendering to standard output
    pub fn print(&self) {
        print!("{self}");
    }

    pub(crate) fn ensure_shape(&self, op: &'static str, expected: (usize, usize)) -> Result<()> {
        if self.shape() != expected {
            return Err(MatrizError::ShapeMismatch {
                op,
                expected,
                actual: self.shape(),
            });
        }
        Ok(())
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrizError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

impl Clone for Matrix {
    fn clone(&self) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = self.rows, cols = self.cols, "matrix copied");
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.clone(),
        }
    }
}

/// Element access by `(row, col)`
///
/// Row and column are not range-checked individually; a column past the end
/// of a row reaches into the next row. Indexing past the buffer panics.
impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.data[row * self.cols + col]
    }
}

/// One line per row, every value followed by a single space
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            for value in row {
                write!(f, "{value} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
