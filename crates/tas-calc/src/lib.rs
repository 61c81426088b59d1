//! # tas-calc
//!
//! Angle calculations for triple-axis spectrometers.
//!
//! This crate turns a crystal lattice, a sample orientation and a target
//! momentum/energy transfer into the six instrument axis angles, and back.
//!
//! # Modules
//!
//! - [`lattice`] - Direct and reciprocal bases, UB matrix
//! - [`triangle`] - Scattering triangle, monochromator and analyzer relations
//! - [`angles`] - Sample angles a3/a4 from Q, and Q from a3
//! - [`config`] - Instrument settings and the a3 zero-point convention
//! - [`calculator`] - Full instrument positions
//!
//! # Example
//!
//! ```rust
//! use tas_calc::{Lattice, ScatteringPlane, TasCalculator, TasConfig};
//! use tas_math::Vector;
//!
//! let b = Lattice::from_degrees([5.0, 5.0, 5.0], [90.0, 90.0, 60.0])?.b_matrix()?;
//! let plane = ScatteringPlane::new(
//!     b,
//!     Vector::from([1.0, 0.0, 0.0]),
//!     Vector::from([-1.0 / 3.0, -2.0 / 3.0, 2.0 / 3.0]),
//! )?;
//! let calc = TasCalculator::new(TasConfig::default(), plane)?;
//!
//! let pos = calc.angles(&Vector::from([1.0, 2.0, 2.0]), 2.0, 2.662)?;
//! let back = calc.position_to_q(&pos)?;
//! assert!((back.e - 2.0).abs() < 1e-9);
//! # Ok::<(), tas_core::Error>(())
//! ```
//!
//! # Units
//!
//! Lattice constants in Å, wavevectors in Å⁻¹, energies in meV, angles in
//! radians. Vectors in rlu are given in the reciprocal basis of the lattice.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod angles;
pub mod calculator;
pub mod config;
pub mod lattice;
pub mod triangle;

pub use angles::{get_a3a4, get_hkl, ScatteringPlane, TasAngles};
pub use calculator::{InstrumentPosition, QPosition, TasCalculator};
pub use config::{A3Convention, TasConfig, D_PG002};
pub use lattice::{get_a_matrix, get_b_matrix, get_orient_up, get_ub_matrix, Lattice};
