//! Variable-length vector type.
//!
//! [`Vector`] holds an ordered sequence of `f64` components. In practice it
//! has 3 components (or 2 inside 2x2 matrix operations) and represents a
//! point or direction either in fractional (rlu) or in Cartesian
//! (Å / Å⁻¹) coordinates. The vector does not know which frame it is in;
//! the caller tracks that.
//!
//! Binary operations check lengths and return
//! [`Error::DimensionMismatch`] instead of panicking.
//!
//! # Usage
//!
//! ```rust
//! use tas_math::Vector;
//!
//! let x = Vector::from([1.0, 2.0, 3.0]);
//! let y = Vector::from([4.0, 5.0, 6.0]);
//! assert_eq!(x.dot(&y).unwrap(), 32.0);
//!
//! let scaled = 2.0 * &x;
//! assert_eq!(scaled, Vector::from([2.0, 4.0, 6.0]));
//! ```

use std::ops::{Div, Index, IndexMut, Mul, Neg};

use tas_core::{Error, Result};

/// A vector of `f64` components.
///
/// # Example
///
/// ```rust
/// use tas_math::Vector;
///
/// let v = Vector::from([3.0, 4.0, 0.0]);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v[1], 4.0);
/// assert_eq!(v.norm_2(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Creates a vector from its components.
    #[inline]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Creates a vector of `n` zeros.
    #[inline]
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    /// Creates a vector from a slice.
    #[inline]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterator over the components.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Consumes the vector and returns its components.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    fn check_len(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::dimension_mismatch(op, self.len(), other.len()));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, op: &'static str, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        self.check_len(other, op)?;
        Ok(Self::new(
            self.iter().zip(other.iter()).map(|(&a, &b)| f(a, b)).collect(),
        ))
    }

    /// Element-wise sum.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the lengths differ.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Element-wise difference.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the lengths differ.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Multiplies every component by a scalar.
    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.iter().map(|x| x * s).collect())
    }

    /// Scalar inner product.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tas_math::Vector;
    ///
    /// let x = Vector::from([1.0, 0.0]);
    /// let y = Vector::from([1.0, 0.0, 0.0]);
    /// assert!(x.dot(&y).is_err());
    /// ```
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.check_len(other, "dot")?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    /// Cross product of two 3-vectors.
    ///
    /// Fails with [`Error::DimensionMismatch`] if either operand does not
    /// have exactly 3 components.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        for v in [self, other] {
            if v.len() != 3 {
                return Err(Error::dimension_mismatch("cross", 3, v.len()));
            }
        }
        let (a, b) = (&self.data, &other.data);
        Ok(Self::from([
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Euclidean length.
    #[inline]
    pub fn norm_2(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Returns the vector scaled to unit length.
    ///
    /// `what` names the operand in the [`Error::ZeroVector`] error returned
    /// for a zero-length vector.
    pub fn normalize(&self, what: &'static str) -> Result<Self> {
        let len = self.norm_2();
        if len == 0.0 {
            return Err(Error::zero_vector(what));
        }
        Ok(self / len)
    }

    /// Returns true if both vectors have the same length and all components
    /// differ by at most `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.iter().all(|x| x.is_finite())
    }

    /// Converts a 3-vector to [`glam::DVec3`].
    pub fn to_dvec3(&self) -> Result<glam::DVec3> {
        if self.len() != 3 {
            return Err(Error::dimension_mismatch("to_dvec3", 3, self.len()));
        }
        Ok(glam::DVec3::from_slice(&self.data))
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    #[inline]
    fn from(a: [f64; N]) -> Self {
        Self::new(a.to_vec())
    }
}

impl From<Vec<f64>> for Vector {
    #[inline]
    fn from(v: Vec<f64>) -> Self {
        Self::new(v)
    }
}

impl From<glam::DVec3> for Vector {
    #[inline]
    fn from(v: glam::DVec3) -> Self {
        Self::from(v.to_array())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

// &Vector * f64
impl Mul<f64> for &Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

// Vector * f64
impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

// f64 * &Vector
impl Mul<&Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: &Vector) -> Vector {
        rhs.scale(self)
    }
}

// f64 * Vector
impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: Vector) -> Vector {
        rhs.scale(self)
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    #[inline]
    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.iter().map(|x| x / rhs).collect())
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn div(self, rhs: f64) -> Vector {
        &self / rhs
    }
}

impl Neg for &Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}
