//! Error types for tas-rs operations.
//!
//! This module provides a single error enum shared by the linear algebra
//! toolkit and the scattering geometry built on top of it.
//!
//! # Overview
//!
//! The [`Error`] enum covers all failure modes that can occur during:
//! - Vector and matrix arithmetic (shape checks)
//! - Determinant and inverse computation
//! - Lattice basis construction
//! - Scattering triangle and angle solving
//!
//! Every failure is a violated mathematical precondition, so there is no
//! retry semantics: the caller has to correct the geometry or the instrument
//! settings.
//!
//! # Usage
//!
//! ```rust
//! use tas_core::{Error, Result};
//!
//! fn checked_acos(what: &'static str, c: f64) -> Result<f64> {
//!     if !(-1.0..=1.0).contains(&c) {
//!         return Err(Error::domain(what, c));
//!     }
//!     Ok(c.acos())
//! }
//!
//! assert!(checked_acos("a4", 1.5).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - `tas-math` - Shape, singularity and zero-vector errors
//! - `tas-calc` - Lattice and kinematic errors

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during TAS calculations.
///
/// # Categories
///
/// - **Shape errors**: [`DimensionMismatch`](Error::DimensionMismatch), [`NotSquare`](Error::NotSquare)
/// - **Linear algebra errors**: [`SingularMatrix`](Error::SingularMatrix), [`ZeroVector`](Error::ZeroVector), [`Degenerate`](Error::Degenerate)
/// - **Crystallography errors**: [`InvalidLattice`](Error::InvalidLattice)
/// - **Kinematic errors**: [`Domain`](Error::Domain)
/// - **Configuration errors**: [`Config`](Error::Config)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Operand shapes are incompatible.
    ///
    /// Returned for vector length mismatches, non-conformable matrix
    /// products and cross products on vectors that are not 3-vectors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tas_core::Error;
    ///
    /// let err = Error::dimension_mismatch("dot", 3, 2);
    /// assert!(err.to_string().contains("dot"));
    /// ```
    #[error("dimension mismatch in {op}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Operation that failed
        op: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Determinant or inverse requested on a non-square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Matrix cannot be inverted because its determinant is zero.
    #[error("singular matrix: determinant={determinant:.6e}")]
    SingularMatrix {
        /// The determinant value
        determinant: f64,
    },

    /// A vector that has to be normalized has zero length.
    #[error("zero-length vector: {what}")]
    ZeroVector {
        /// Which operand was zero
        what: &'static str,
    },

    /// Vectors that have to span a plane are collinear.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// Lattice constants or angles do not describe a physical unit cell.
    #[error("invalid lattice: {0}")]
    InvalidLattice(String),

    /// Argument of an inverse trigonometric function or of a square root is
    /// outside its domain.
    ///
    /// For the scattering formulas this means the requested configuration
    /// is kinematically inaccessible.
    #[error("{what}: value {value} is outside the valid domain")]
    Domain {
        /// Quantity that was being computed
        what: &'static str,
        /// Offending argument
        value: f64,
    },

    /// Instrument configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(op: &'static str, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { op, expected, got }
    }

    /// Creates an [`Error::NotSquare`] error.
    #[inline]
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Creates an [`Error::SingularMatrix`] error.
    #[inline]
    pub fn singular(determinant: f64) -> Self {
        Self::SingularMatrix { determinant }
    }

    /// Creates an [`Error::ZeroVector`] error.
    #[inline]
    pub fn zero_vector(what: &'static str) -> Self {
        Self::ZeroVector { what }
    }

    /// Creates an [`Error::Degenerate`] error.
    #[inline]
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    /// Creates an [`Error::InvalidLattice`] error.
    #[inline]
    pub fn invalid_lattice(msg: impl Into<String>) -> Self {
        Self::InvalidLattice(msg.into())
    }

    /// Creates an [`Error::Domain`] error.
    #[inline]
    pub fn domain(what: &'static str, value: f64) -> Self {
        Self::Domain { what, value }
    }

    /// Creates an [`Error::Config`] error.
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if this is a shape-related error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::NotSquare { .. })
    }

    /// Returns `true` if the requested scattering configuration is
    /// kinematically inaccessible.
    #[inline]
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Returns `true` if this is a lattice error.
    #[inline]
    pub fn is_lattice_error(&self) -> bool {
        matches!(self, Self::InvalidLattice(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch("cross", 3, 2);
        let msg = err.to_string();
        assert!(msg.contains("cross"));
        assert!(msg.contains("expected 3"));
        assert!(msg.contains("got 2"));
        assert!(err.is_shape_error());
    }

    #[test]
    fn test_not_square() {
        let err = Error::not_square(2, 3);
        assert!(err.to_string().contains("2x3"));
        assert!(err.is_shape_error());
        assert!(!err.is_domain_error());
    }

    #[test]
    fn test_domain() {
        let err = Error::domain("a4", 1.25);
        assert!(err.to_string().contains("a4"));
        assert!(err.to_string().contains("1.25"));
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_invalid_lattice() {
        let err = Error::invalid_lattice("sin(gamma) is zero");
        assert!(err.is_lattice_error());
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn test_singular() {
        let err = Error::singular(0.0);
        assert_eq!(err, Error::SingularMatrix { determinant: 0.0 });
    }
}
