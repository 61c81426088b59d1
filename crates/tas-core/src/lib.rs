//! # tas-core
//!
//! Core types for triple-axis spectrometer (TAS) calculations.
//!
//! This crate provides the foundational pieces shared by the rest of tas-rs:
//!
//! - [`Error`], [`Result`] - Error taxonomy for shape, singularity, lattice
//!   and kinematic failures
//! - [`E_TO_K2`] - Neutron energy to squared wavevector conversion
//! - [`deg_to_rad`], [`rad_to_deg`] - Angle unit helpers
//!
//! ## Crate Structure
//!
//! ```text
//! tas-core (this crate)
//!    ^
//!    |
//!    +-- tas-math (vectors, matrices, metric tensor)
//!    +-- tas-calc (lattice, scattering triangle, angle solving)
//!    +-- tas-cli  (command line front end)
//! ```
//!
//! All angles are in radians internally. Conversion to and from degrees is
//! the caller's responsibility.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod consts;
pub mod error;

pub use consts::*;
pub use error::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use tas_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::consts::{deg_to_rad, rad_to_deg, E_TO_K2};
    pub use crate::error::{Error, Result};
}
