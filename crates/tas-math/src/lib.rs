//! # tas-math
//!
//! Small linear algebra toolkit for crystallography and scattering geometry.
//!
//! This crate provides the primitives the crystallographic formulas are
//! built on:
//!
//! - [`Vector`] - Component vectors with checked arithmetic, dot and cross products
//! - [`Matrix`] - Row-major matrices with products, transpose, determinant and inverse
//! - [`rotate`] - Rodrigues rotation around an arbitrary axis
//! - [`get_metric`], [`dot_metric`], [`angle_metric`] - Inner products in
//!   non-orthonormal (fractional) bases
//! - [`cross_rlu`] - Cross product in fractional coordinates
//!
//! # Design
//!
//! Sizes are dynamic but small (2 or 3 components in practice), so every
//! binary operation checks shapes and returns [`tas_core::Error`] instead of
//! panicking. All matrices are stored as **rows** and act on **column
//! vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tas_math::{Matrix, Vector};
//!
//! let m = Matrix::from([[1.0, 2.0], [3.0, 4.0]]);
//! let inv = m.inv().unwrap();
//! assert!(inv.approx_eq(&Matrix::from([[-2.0, 1.0], [1.5, -0.5]]), 1e-12));
//!
//! let v = m.dot_vec(&Vector::from([1.0, 1.0])).unwrap();
//! assert_eq!(v, Vector::from([3.0, 7.0]));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Interop with `DVec3` / `DMat3`
//! - `tas-core` - Error types
//!
//! # Used By
//!
//! - `tas-calc` - Lattice bases, UB matrix and angle solving

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod matrix;
mod metric;
mod rotation;
mod vector;

pub use matrix::*;
pub use metric::*;
pub use rotation::*;
pub use vector::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DVec3};
}
