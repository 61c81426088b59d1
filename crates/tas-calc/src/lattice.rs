//! Crystal lattice bases and the UB orientation matrix.
//!
//! # Matrices
//!
//! - **A** converts fractional coordinates to real-space lab coordinates.
//!   Its columns are the direct basis vectors `a`, `b`, `c`.
//! - **B** converts rlu to Å⁻¹: `B = 2π (A⁻¹)ᵗ`. Its columns are the
//!   reciprocal basis vectors.
//! - **UB** additionally rotates into the frame spanned by the scattering
//!   plane chosen by the user.
//!
//! # Usage
//!
//! ```rust
//! use tas_calc::Lattice;
//! use tas_math::Vector;
//!
//! let lattice = Lattice::from_degrees([5.0, 5.0, 5.0], [90.0, 90.0, 90.0]).unwrap();
//! let b = lattice.b_matrix().unwrap();
//! let q = b.dot_vec(&Vector::from([1.0, 0.0, 0.0])).unwrap();
//! assert!((q.norm_2() - 2.0 * std::f64::consts::PI / 5.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use tas_core::{deg_to_rad, Error, Result};
use tas_math::{cross_rlu, get_metric, Matrix, Vector};

/// Below this `|sin(gamma)|` the A matrix is undefined.
const SIN_EPS: f64 = 1e-12;

/// At or below this radicand the angles describe a flat cell.
const RADICAND_EPS: f64 = 1e-12;

/// Below this sine of the enclosed angle two orientation vectors count as
/// collinear.
const COLLINEAR_EPS: f64 = 1e-9;

/// Lattice constants (Å) and angles (radians) of a unit cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    lengths: [f64; 3],
    angles: [f64; 3],
}

impl Lattice {
    /// Creates a lattice from lengths `a, b, c` (Å) and angles
    /// `alpha, beta, gamma` (radians).
    ///
    /// Fails with [`Error::InvalidLattice`] if a length is not positive or
    /// an angle lies outside (0, π). The combination of angles is checked
    /// when the A matrix is built.
    pub fn new(lengths: [f64; 3], angles: [f64; 3]) -> Result<Self> {
        if let Some(l) = lengths.iter().find(|l| !(**l > 0.0)) {
            return Err(Error::invalid_lattice(format!("lattice constant {l} is not positive")));
        }
        if let Some(a) = angles.iter().find(|a| !(**a > 0.0 && **a < PI)) {
            return Err(Error::invalid_lattice(format!("lattice angle {a} rad is outside (0, pi)")));
        }
        Ok(Self { lengths, angles })
    }

    /// Creates a lattice with angles given in degrees.
    pub fn from_degrees(lengths: [f64; 3], angles_deg: [f64; 3]) -> Result<Self> {
        Self::new(lengths, angles_deg.map(deg_to_rad))
    }

    /// Lattice constants `a, b, c` in Å.
    #[inline]
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    /// Lattice angles `alpha, beta, gamma` in radians.
    #[inline]
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Real-space basis matrix, see [`get_a_matrix`].
    pub fn a_matrix(&self) -> Result<Matrix> {
        get_a_matrix(&self.lengths, &self.angles)
    }

    /// Reciprocal basis matrix, see [`get_b_matrix`].
    pub fn b_matrix(&self) -> Result<Matrix> {
        get_b_matrix(&self.lengths, &self.angles)
    }

    /// Metric tensor of the reciprocal basis.
    pub fn metric(&self) -> Result<Matrix> {
        get_metric(&self.b_matrix()?)
    }

    /// Unit cell volume in Å³.
    pub fn volume(&self) -> Result<f64> {
        self.a_matrix()?.det()
    }
}

/// Crystallographic A matrix converting fractional to lab coordinates.
///
/// The columns are the direct basis vectors:
///
/// ```text
/// a = l0 (1, 0, 0)
/// b = l1 (cos g, sin g, 0)
/// c = l2 (cos b, (cos a - cos b cos g) / sin g, sqrt(1 - cos²a - cos²b - cos²g + 2 cos a cos b cos g) / sin g)
/// ```
///
/// Fails with [`Error::InvalidLattice`] if `sin(gamma)` vanishes or if the
/// angles cannot close a cell (radicand at or below zero, which includes
/// flat cells such as `alpha + beta = gamma`).
pub fn get_a_matrix(lattice: &[f64; 3], angles: &[f64; 3]) -> Result<Matrix> {
    let cs = angles.map(f64::cos);
    let s2 = angles[2].sin();
    if s2.abs() < SIN_EPS {
        return Err(Error::invalid_lattice(format!(
            "sin(gamma) vanishes for gamma = {} rad",
            angles[2]
        )));
    }

    let radicand = 1.0 - cs.iter().map(|c| c * c).sum::<f64>() + 2.0 * cs[0] * cs[1] * cs[2];
    if !(radicand > RADICAND_EPS) {
        return Err(Error::invalid_lattice(format!(
            "angles {angles:?} do not form a unit cell (radicand {radicand})"
        )));
    }

    let basis = Matrix::from([
        [lattice[0], 0.0, 0.0],
        [lattice[1] * cs[2], lattice[1] * s2, 0.0],
        [
            lattice[2] * cs[1],
            lattice[2] * (cs[0] - cs[1] * cs[2]) / s2,
            lattice[2] * radicand.sqrt() / s2,
        ],
    ]);
    Ok(basis.transpose())
}

/// Crystallographic B matrix converting rlu to Å⁻¹.
///
/// `B = 2π (A⁻¹)ᵗ`; the reciprocal basis vectors form its columns.
/// Propagates errors from [`get_a_matrix`] and reports a flat cell as
/// [`Error::SingularMatrix`].
pub fn get_b_matrix(lattice: &[f64; 3], angles: &[f64; 3]) -> Result<Matrix> {
    let a = get_a_matrix(lattice, angles)?;
    Ok(a.inv()?.transpose().scale(2.0 * PI))
}

/// UB orientation matrix.
///
/// The orientation vectors are converted to Å⁻¹ with `B`, normalized and
/// stacked as the rows of `U`; the result is `U B`. It maps rlu onto the
/// frame `(orient1, orient2, orient_up)`, so for an orthogonal choice of
/// orientation vectors the third component of `UB q` is the distance of `q`
/// from the scattering plane.
///
/// No orthogonalization takes place: `orient_up` should be perpendicular to
/// the plane spanned by `orient1` and `orient2`.
///
/// Fails with [`Error::ZeroVector`] for a zero orientation vector and with
/// [`Error::Degenerate`] if `orient1` and `orient2` are collinear.
pub fn get_ub_matrix(
    b: &Matrix,
    orient1_rlu: &Vector,
    orient2_rlu: &Vector,
    orient_up_rlu: &Vector,
) -> Result<Matrix> {
    let orient1 = b.dot_vec(orient1_rlu)?.normalize("orient1")?;
    let orient2 = b.dot_vec(orient2_rlu)?.normalize("orient2")?;
    let orient_up = b.dot_vec(orient_up_rlu)?.normalize("orient_up")?;

    if orient1.cross(&orient2)?.norm_2() < COLLINEAR_EPS {
        return Err(Error::degenerate(format!(
            "orientation vectors {:?} and {:?} are collinear",
            orient1_rlu.as_slice(),
            orient2_rlu.as_slice()
        )));
    }

    let u = Matrix::from_rows(vec![orient1, orient2, orient_up])?;
    u.dot(b)
}

/// Normal of the scattering plane spanned by `orient1` and `orient2`, in rlu.
///
/// Fails with [`Error::Degenerate`] if the two vectors are collinear.
pub fn get_orient_up(b: &Matrix, orient1_rlu: &Vector, orient2_rlu: &Vector) -> Result<Vector> {
    let up = cross_rlu(orient1_rlu, orient2_rlu, b)?;
    let lab_len = b.dot_vec(&up)?.norm_2();
    let scale = b.dot_vec(orient1_rlu)?.norm_2() * b.dot_vec(orient2_rlu)?.norm_2();
    if !(lab_len > COLLINEAR_EPS * scale) {
        return Err(Error::degenerate(format!(
            "orientation vectors {:?} and {:?} do not span a plane",
            orient1_rlu.as_slice(),
            orient2_rlu.as_slice()
        )));
    }
    Ok(up)
}
