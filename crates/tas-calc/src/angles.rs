//! Sample angles a3/a4 from Q in rlu, and back.
//!
//! The scattering plane is fixed by an orientation reflection `orient` and
//! the plane normal `orient_up`, both in rlu. For a momentum transfer `Q`
//! in that plane:
//!
//! - `xi` is the angle between `orient` and `Q`, signed around `orient_up`
//! - `psi` is the angle between `ki` and `Q` from the scattering triangle
//! - `a3 = -psi - xi + offset`, where the offset depends on the
//!   [`A3Convention`]
//!
//! [`get_a3a4`] and [`get_hkl`] invert each other up to rounding.
//!
//! # Usage
//!
//! ```rust
//! use tas_calc::{get_a3a4, get_hkl, A3Convention, Lattice, ScatteringPlane};
//! use tas_calc::triangle::get_ki;
//! use tas_math::Vector;
//!
//! let b = Lattice::from_degrees([5.0, 5.0, 5.0], [90.0, 90.0, 60.0]).unwrap().b_matrix().unwrap();
//! let plane = ScatteringPlane::new(
//!     b,
//!     Vector::from([1.0, 0.0, 0.0]),
//!     Vector::from([-1.0 / 3.0, -2.0 / 3.0, 2.0 / 3.0]),
//! ).unwrap();
//!
//! let kf = 2.662;
//! let ki = get_ki(kf, 2.0).unwrap();
//! let q = Vector::from([1.0, 2.0, 2.0]);
//! let angles = get_a3a4(ki, kf, &q, &plane, 1.0, A3Convention::KiAlongOrient).unwrap();
//!
//! let q_len = plane.q_length(&q).unwrap();
//! let hkl = get_hkl(ki, kf, angles.a3, q_len, &plane, 1.0, A3Convention::KiAlongOrient).unwrap();
//! assert!(hkl.approx_eq(&q, 1e-6));
//! ```

use tas_core::{Error, Result};
use tas_math::{angle_metric, cross_rlu, get_metric, length_metric, rotate, Matrix, Vector};
use tracing::{debug, trace, warn};

use crate::config::A3Convention;
use crate::lattice::{get_orient_up, get_ub_matrix};
use crate::triangle::{get_a4, get_psi};

/// Distance to the scattering plane (Å⁻¹) above which a warning is logged.
const PLANE_TOLERANCE: f64 = 1e-4;

/// Scattering plane of a crystal: its reciprocal basis together with the
/// orientation reflection and the plane normal.
///
/// Derived quantities (metric, inverse of B, lab-frame orientation vectors)
/// are computed once on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringPlane {
    b: Matrix,
    b_inv: Matrix,
    metric: Matrix,
    orient_rlu: Vector,
    orient_up_rlu: Vector,
    orient_lab: Vector,
    orient_up_lab: Vector,
}

impl ScatteringPlane {
    /// Creates a scattering plane from the B matrix, the orientation
    /// reflection and the plane normal (both in rlu).
    ///
    /// Fails with [`Error::ZeroVector`] if either vector vanishes, with
    /// [`Error::Degenerate`] if they are collinear and with
    /// [`Error::SingularMatrix`] if `B` is singular. Perpendicularity is not
    /// enforced; `orient_up` should be the normal of the intended plane.
    pub fn new(b: Matrix, orient_rlu: Vector, orient_up_rlu: Vector) -> Result<Self> {
        let orient_lab = b.dot_vec(&orient_rlu)?;
        let orient_up_lab = b.dot_vec(&orient_up_rlu)?;
        if orient_lab.norm_2() == 0.0 {
            return Err(Error::zero_vector("orient"));
        }
        if orient_up_lab.norm_2() == 0.0 {
            return Err(Error::zero_vector("orient_up"));
        }
        let sin_enclosed = orient_lab.cross(&orient_up_lab)?.norm_2()
            / (orient_lab.norm_2() * orient_up_lab.norm_2());
        if sin_enclosed < 1e-9 {
            return Err(Error::degenerate("plane normal is collinear with the orientation reflection"));
        }

        let b_inv = b.inv()?;
        let metric = get_metric(&b)?;
        Ok(Self {
            b,
            b_inv,
            metric,
            orient_rlu,
            orient_up_rlu,
            orient_lab,
            orient_up_lab,
        })
    }

    /// Creates a scattering plane from two in-plane reflections; the normal
    /// is their cross product in rlu.
    pub fn from_orients(b: Matrix, orient1_rlu: Vector, orient2_rlu: Vector) -> Result<Self> {
        let up = get_orient_up(&b, &orient1_rlu, &orient2_rlu)?;
        Self::new(b, orient1_rlu, up)
    }

    /// Reciprocal basis matrix B.
    #[inline]
    pub fn b_matrix(&self) -> &Matrix {
        &self.b
    }

    /// Metric tensor `Bᵗ B`.
    #[inline]
    pub fn metric(&self) -> &Matrix {
        &self.metric
    }

    /// Orientation reflection in rlu.
    #[inline]
    pub fn orient(&self) -> &Vector {
        &self.orient_rlu
    }

    /// Plane normal in rlu.
    #[inline]
    pub fn orient_up(&self) -> &Vector {
        &self.orient_up_rlu
    }

    /// Second in-plane direction, perpendicular to the orientation
    /// reflection, in rlu.
    pub fn orient2(&self) -> Result<Vector> {
        cross_rlu(&self.orient_up_rlu, &self.orient_rlu, &self.b)
    }

    /// UB matrix of the frame `(orient, orient2, orient_up)`.
    pub fn ub_matrix(&self) -> Result<Matrix> {
        get_ub_matrix(&self.b, &self.orient_rlu, &self.orient2()?, &self.orient_up_rlu)
    }

    /// Modulus of `q_rlu` in Å⁻¹.
    pub fn q_length(&self, q_rlu: &Vector) -> Result<f64> {
        length_metric(q_rlu, &self.metric)
    }

    /// Signed distance of `q_rlu` from the scattering plane, in Å⁻¹.
    pub fn distance(&self, q_rlu: &Vector) -> Result<f64> {
        let q_lab = self.b.dot_vec(q_rlu)?;
        Ok(q_lab.dot(&self.orient_up_lab)? / self.orient_up_lab.norm_2())
    }
}

/// Result of the forward angle calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TasAngles {
    /// Sample rotation angle in radians.
    pub a3: f64,
    /// Scattering angle in radians, signed by the scattering sense.
    pub a4: f64,
    /// Distance of Q from the scattering plane in Å⁻¹; close to zero for a
    /// reachable reflection.
    pub dist_plane: f64,
}

/// Sample angles a3 and a4 for the momentum transfer `q_rlu`.
///
/// `sense` (±1) is the scattering sense at the sample. Fails with
/// [`Error::Domain`] if Q cannot be reached with `ki` and `kf` and if
/// `q_rlu` is the zero vector.
pub fn get_a3a4(
    ki: f64,
    kf: f64,
    q_rlu: &Vector,
    plane: &ScatteringPlane,
    sense: f64,
    convention: A3Convention,
) -> Result<TasAngles> {
    let metric = plane.metric();

    // angle xi between Q and the orientation reflection
    let mut xi = angle_metric(q_rlu, plane.orient(), metric)?;

    // sign of xi
    let q_lab = plane.b_matrix().dot_vec(q_rlu)?;
    if plane.orient_lab.cross(&q_lab)?.dot(&plane.orient_up_lab)? < 0.0 {
        xi = -xi;
    }

    let q_len = plane.q_length(q_rlu)?;
    let psi = get_psi(ki, kf, q_len, sense)?;

    let a3 = -psi - xi + convention.offset();
    let a4 = sense * get_a4(ki, kf, q_len)?;
    let dist_plane = plane.distance(q_rlu)?;

    trace!(xi, psi, q_len, "scattering triangle");
    if dist_plane.abs() > PLANE_TOLERANCE {
        warn!(
            q = ?q_rlu.as_slice(),
            dist_plane,
            "Q is not in the scattering plane"
        );
    }
    debug!(a3, a4, dist_plane, "Solved sample angles");

    Ok(TasAngles { a3, a4, dist_plane })
}

/// Momentum transfer in rlu for the sample angle `a3` and modulus `q_len`.
///
/// Inverse of [`get_a3a4`]: the orientation reflection is rotated around the
/// plane normal by `xi` and rescaled to `q_len`.
pub fn get_hkl(
    ki: f64,
    kf: f64,
    a3: f64,
    q_len: f64,
    plane: &ScatteringPlane,
    sense: f64,
    convention: A3Convention,
) -> Result<Vector> {
    // angle enclosed by ki and Q
    let psi = get_psi(ki, kf, q_len, sense)?;

    // angle between Q and the orientation reflection
    let xi = -a3 + convention.offset() - psi;

    let q_lab = rotate(&plane.orient_up_lab, &plane.orient_lab, xi)?;
    let q_lab = q_lab.scale(q_len / q_lab.norm_2());
    let q_rlu = plane.b_inv.dot_vec(&q_lab)?;

    debug!(a3, q_len, q = ?q_rlu.as_slice(), "Solved Q position");
    Ok(q_rlu)
}
