//! Rotation of vectors around an arbitrary axis.

use tas_core::{Error, Result};

use crate::Vector;

/// Rotates `vec` by `phi` radians around `axis` using Rodrigues' formula.
///
/// ```text
/// v' = cos(phi) v + (1 - cos(phi)) (v . n) n + sin(phi) (n x v)
/// ```
///
/// The axis is normalized internally. Fails with
/// [`Error::DimensionMismatch`] if either vector is not a 3-vector and with
/// [`Error::ZeroVector`] if the axis has zero length.
///
/// # Example
///
/// ```rust
/// use std::f64::consts::FRAC_PI_2;
/// use tas_math::{rotate, Vector};
///
/// let z = Vector::from([0.0, 0.0, 2.0]);
/// let x = Vector::from([1.0, 0.0, 0.0]);
/// let y = rotate(&z, &x, FRAC_PI_2).unwrap();
/// assert!(y.approx_eq(&Vector::from([0.0, 1.0, 0.0]), 1e-12));
/// ```
pub fn rotate(axis: &Vector, vec: &Vector, phi: f64) -> Result<Vector> {
    for v in [axis, vec] {
        if v.len() != 3 {
            return Err(Error::dimension_mismatch("rotate", 3, v.len()));
        }
    }
    let n = axis.normalize("rotation axis")?;

    let (s, c) = phi.sin_cos();
    let along = n.scale((1.0 - c) * vec.dot(&n)?);
    let perp = n.cross(vec)?.scale(s);

    vec.scale(c).add(&along)?.add(&perp)
}
