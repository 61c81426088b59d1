//! Small dense matrix type.
//!
//! [`Matrix`] is used both as a linear operator and as a coordinate
//! transform (the crystallographic A, B and UB matrices).
//!
//! # Convention
//!
//! Matrices are stored as a sequence of **row vectors** and act on
//! **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! All rows have the same length. Square-only operations ([`Matrix::det`],
//! [`Matrix::inv`]) fail with [`Error::NotSquare`] otherwise.
//!
//! # Usage
//!
//! ```rust
//! use tas_math::Matrix;
//!
//! let m = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
//! assert_eq!(m.det().unwrap(), -2.0);
//!
//! let inv = m.inv().unwrap();
//! assert!(m.dot(&inv).unwrap().approx_eq(&Matrix::identity(2), 1e-12));
//! ```

use std::ops::{Index, IndexMut, Mul};

use tas_core::{Error, Result};

use crate::Vector;

/// A dense matrix stored as row vectors.
///
/// # Example
///
/// ```rust
/// use tas_math::{Matrix, Vector};
///
/// let identity = Matrix::identity(3);
/// let v = Vector::from([1.0, 2.0, 3.0]);
/// assert_eq!(identity.dot_vec(&v).unwrap(), v);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: Vec<Vector>,
}

impl Matrix {
    /// Creates a matrix from row vectors.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the rows are ragged.
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let cols = first.len();
            if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
                return Err(Error::dimension_mismatch("from_rows", cols, bad.len()));
            }
        }
        Ok(Self { rows })
    }

    /// Creates a matrix whose columns are the given vectors.
    pub fn from_cols(cols: &[Vector]) -> Result<Self> {
        Self::from_rows(cols.to_vec()).map(|m| m.transpose())
    }

    /// Creates an `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![Vector::zeros(cols); rows],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.rows[i][i] = 1.0;
        }
        m
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.rows.first().map_or(0, Vector::len)
    }

    /// Returns true if the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &Vector {
        &self.rows[i]
    }

    /// Returns all rows.
    #[inline]
    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Returns column `j` as a vector.
    pub fn col(&self, j: usize) -> Vector {
        Vector::new(self.rows.iter().map(|r| r[j]).collect())
    }

    /// Returns the transpose. Works for non-square matrices.
    pub fn transpose(&self) -> Self {
        Self {
            rows: (0..self.ncols()).map(|j| self.col(j)).collect(),
        }
    }

    fn check_same_shape(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.nrows() != other.nrows() {
            return Err(Error::dimension_mismatch(op, self.nrows(), other.nrows()));
        }
        if self.ncols() != other.ncols() {
            return Err(Error::dimension_mismatch(op, self.ncols(), other.ncols()));
        }
        Ok(())
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_shape(other, "add")?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.add(b))
            .collect::<Result<_>>()?;
        Ok(Self { rows })
    }

    /// Element-wise difference.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_shape(other, "sub")?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.sub(b))
            .collect::<Result<_>>()?;
        Ok(Self { rows })
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&self, s: f64) -> Self {
        Self {
            rows: self.rows.iter().map(|r| r.scale(s)).collect(),
        }
    }

    /// Matrix-vector product `M * x`.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `x.len() != ncols`.
    pub fn dot_vec(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.ncols() {
            return Err(Error::dimension_mismatch("dot_vec", self.ncols(), x.len()));
        }
        let data = self.rows.iter().map(|r| r.dot(x)).collect::<Result<Vec<_>>>()?;
        Ok(Vector::new(data))
    }

    /// Matrix-matrix product `self * other`.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `self.ncols != other.nrows`.
    pub fn dot(&self, other: &Self) -> Result<Self> {
        if self.ncols() != other.nrows() {
            return Err(Error::dimension_mismatch("dot", self.ncols(), other.nrows()));
        }
        let other_t = other.transpose();
        let mut rows = Vec::with_capacity(self.nrows());
        for r in &self.rows {
            let data = other_t.rows.iter().map(|c| r.dot(c)).collect::<Result<Vec<_>>>()?;
            rows.push(Vector::new(data));
        }
        Ok(Self { rows })
    }

    /// Returns the matrix without row `i` and column `j`.
    ///
    /// Only the indices are bounds-checked.
    pub fn submat(&self, i: usize, j: usize) -> Result<Self> {
        if i >= self.nrows() {
            return Err(Error::dimension_mismatch("submat", self.nrows(), i));
        }
        if j >= self.ncols() {
            return Err(Error::dimension_mismatch("submat", self.ncols(), j));
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(r, _)| *r != i)
            .map(|(_, row)| {
                Vector::new(
                    row.iter()
                        .enumerate()
                        .filter(|(c, _)| *c != j)
                        .map(|(_, &x)| x)
                        .collect(),
                )
            })
            .collect();
        Ok(Self { rows })
    }

    /// Computes the determinant.
    ///
    /// Sizes up to 3x3 use closed forms; larger matrices fall back to a
    /// cofactor expansion along the first row.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tas_math::Matrix;
    ///
    /// let m = Matrix::from([[1.0, -2.0, 3.0], [4.0, 5.0, -6.0], [7.0, 8.0, 9.0]]);
    /// assert!((m.det().unwrap() - 240.0).abs() < 1e-9);
    /// ```
    pub fn det(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(Error::not_square(self.nrows(), self.ncols()));
        }
        let m = &self.rows;
        let d = match self.nrows() {
            0 => 0.0,
            1 => m[0][0],
            2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
            3 => {
                m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                    - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                    + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
            }
            n => {
                let mut d = 0.0;
                for j in 0..n {
                    let c = m[0][j];
                    if c == 0.0 {
                        continue;
                    }
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    d += sign * c * self.submat(0, j)?.det()?;
                }
                d
            }
        };
        Ok(d)
    }

    /// Signed minor `(-1)^(i+j) * det(submat(i, j))`.
    fn cofactor(&self, i: usize, j: usize) -> Result<f64> {
        let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
        Ok(sign * self.submat(i, j)?.det()?)
    }

    /// Computes the inverse via the adjugate matrix.
    ///
    /// Fails with [`Error::NotSquare`] for non-square input and with
    /// [`Error::SingularMatrix`] if the determinant is exactly zero.
    /// Near-singular matrices are inverted and may produce huge entries.
    pub fn inv(&self) -> Result<Self> {
        let det = self.det()?;
        if det == 0.0 {
            return Err(Error::singular(det));
        }

        let n = self.nrows();
        if n == 1 {
            return Ok(Self::from([[1.0 / det]]));
        }

        // Cofactor matrix, transposed and scaled by 1/det
        let mut inv = Self::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                inv.rows[j][i] = self.cofactor(i, j)? / det;
            }
        }
        Ok(inv)
    }

    /// Returns true if both matrices have the same shape and all elements
    /// differ by at most `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.nrows() == other.nrows()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.approx_eq(b, eps))
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.rows.iter().all(Vector::is_finite)
    }

    /// Converts a 3x3 matrix to [`glam::DMat3`] (column-major).
    pub fn to_dmat3(&self) -> Result<glam::DMat3> {
        if self.nrows() != 3 || self.ncols() != 3 {
            return Err(Error::dimension_mismatch("to_dmat3", 3, self.nrows().max(self.ncols())));
        }
        Ok(glam::DMat3::from_cols(
            self.col(0).to_dvec3()?,
            self.col(1).to_dvec3()?,
            self.col(2).to_dvec3()?,
        ))
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(rows: [[f64; C]; R]) -> Self {
        Self {
            rows: rows.into_iter().map(Vector::from).collect(),
        }
    }
}

impl From<glam::DMat3> for Matrix {
    fn from(m: glam::DMat3) -> Self {
        // glam is column-major
        Self::from(m.transpose().to_cols_array_2d())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.rows[i][j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.rows[i][j]
    }
}

// Matrix * f64
impl Mul<f64> for &Matrix {
    type Output = Matrix;

    #[inline]
    fn mul(self, rhs: f64) -> Matrix {
        self.scale(rhs)
    }
}

// f64 * Matrix
impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    #[inline]
    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.scale(self)
    }
}
