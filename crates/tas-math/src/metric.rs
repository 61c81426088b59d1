//! Inner products in non-orthonormal bases.
//!
//! Vectors in reciprocal-lattice units (rlu) are expressed in the crystal's
//! own basis. The metric tensor `G = Bᵗ B` of the basis matrix `B` encodes
//! all inner products directly in these coordinates:
//!
//! ```text
//! x . y = xᵗ G y
//! ```
//!
//! so lengths and angles between reflections can be computed without
//! converting to Cartesian coordinates first.
//!
//! # Usage
//!
//! ```rust
//! use tas_math::{get_metric, length_metric, Matrix, Vector};
//!
//! let b = Matrix::from([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
//! let g = get_metric(&b).unwrap();
//! let len = length_metric(&Vector::from([1.0, 0.0, 0.0]), &g).unwrap();
//! assert_eq!(len, 2.0);
//! ```

use tas_core::{Error, Result};

use crate::{Matrix, Vector};

/// Slack allowed on a cosine before it is treated as out of range.
const COS_EPS: f64 = 1e-9;

/// Returns the metric tensor `Bᵗ B` of a basis matrix.
pub fn get_metric(b: &Matrix) -> Result<Matrix> {
    b.transpose().dot(b)
}

/// Inner product `xᵗ G y` under the metric `G`.
pub fn dot_metric(x: &Vector, y: &Vector, metric: &Matrix) -> Result<f64> {
    x.dot(&metric.dot_vec(y)?)
}

/// Length `sqrt(xᵗ G x)` under the metric `G`.
pub fn length_metric(x: &Vector, metric: &Matrix) -> Result<f64> {
    let len2 = dot_metric(x, x, metric)?;
    if len2 < 0.0 {
        return Err(Error::domain("squared metric length", len2));
    }
    Ok(len2.sqrt())
}

/// Angle between `x` and `y` under the metric `G`, in radians.
///
/// Fails with [`Error::Domain`] if either vector has zero length under the
/// metric or if the cosine falls outside [-1, 1] by more than rounding.
pub fn angle_metric(x: &Vector, y: &Vector, metric: &Matrix) -> Result<f64> {
    let len_x = length_metric(x, metric)?;
    let len_y = length_metric(y, metric)?;
    if len_x == 0.0 || len_y == 0.0 {
        return Err(Error::domain("vector length in angle", 0.0));
    }

    let c = dot_metric(x, y, metric)? / (len_x * len_y);
    if c.abs() > 1.0 + COS_EPS || c.is_nan() {
        return Err(Error::domain("cosine of angle", c));
    }
    Ok(c.clamp(-1.0, 1.0).acos())
}

/// Cross product of two vectors given in fractional coordinates of the basis
/// `B`, with the result in the same fractional coordinates.
///
/// Uses the Levi-Civita tensor of the basis, `ε_ijk = det[b_i, b_j, b_k]`
/// with `b_i` the columns of `B`, and raises the index with the inverse
/// metric. The result `c` satisfies `B c = (B a) x (B b)`.
pub fn cross_rlu(a: &Vector, b: &Vector, basis: &Matrix) -> Result<Vector> {
    for v in [a, b] {
        if v.len() != 3 {
            return Err(Error::dimension_mismatch("cross_rlu", 3, v.len()));
        }
    }
    if basis.nrows() != 3 || basis.ncols() != 3 {
        return Err(Error::dimension_mismatch("cross_rlu", 3, basis.ncols()));
    }

    let cols = [basis.col(0), basis.col(1), basis.col(2)];
    let levi = |i: usize, j: usize, k: usize| -> Result<f64> {
        Matrix::from_rows(vec![cols[i].clone(), cols[j].clone(), cols[k].clone()])?.det()
    };

    // covariant components c_i = ε_ijk a_j b_k
    let mut cov = Vector::zeros(3);
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                if i == j || j == k || i == k {
                    continue;
                }
                cov[i] += levi(i, j, k)? * a[j] * b[k];
            }
        }
    }

    get_metric(basis)?.inv()?.dot_vec(&cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    /// Hexagonal-like reciprocal basis (gamma = 60 deg, a = 5 A).
    fn basis() -> Matrix {
        Matrix::from([
            [1.2566370614359172, 0.0, 0.0],
            [-0.7255197456936874, 1.4510394913873745, 0.0],
            [0.0, 0.0, 1.2566370614359172],
        ])
    }

    #[test]
    fn test_metric_symmetric_positive() {
        let g = get_metric(&basis()).unwrap();
        assert!(g.approx_eq(&g.transpose(), 1e-12));
        assert!(g.det().unwrap() > 0.0);
        assert!(g[(0, 0)] > 0.0);

        for x in [[1.0, 0.0, 0.0], [1.0, -2.0, 0.5], [0.0, 0.3, -7.0]] {
            assert!(dot_metric(&Vector::from(x), &Vector::from(x), &g).unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_metric_matches_cartesian() {
        let b = basis();
        let g = get_metric(&b).unwrap();
        let x = Vector::from([1.0, 2.0, 2.0]);
        let y = Vector::from([1.0, 0.0, 0.0]);
        let bx = b.dot_vec(&x).unwrap();
        let by = b.dot_vec(&y).unwrap();
        assert_abs_diff_eq!(dot_metric(&x, &y, &g).unwrap(), bx.dot(&by).unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(length_metric(&x, &g).unwrap(), bx.norm_2(), epsilon = 1e-12);
    }

    #[test]
    fn test_angle() {
        let g = Matrix::identity(3);
        let x = Vector::from([1.0, 0.0, 0.0]);
        let y = Vector::from([0.0, 3.0, 0.0]);
        assert_abs_diff_eq!(angle_metric(&x, &y, &g).unwrap(), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_metric(&x, &x, &g).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_metric(&x, &-&x, &g).unwrap(), PI, epsilon = 1e-12);

        // a* and b* enclose 120 deg for gamma = 60 deg
        let g = get_metric(&basis()).unwrap();
        let ang = angle_metric(&x, &Vector::from([0.0, 1.0, 0.0]), &g).unwrap();
        assert_abs_diff_eq!(ang, 2.0 * PI / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_zero_vector() {
        let g = Matrix::identity(3);
        let err = angle_metric(&Vector::zeros(3), &Vector::from([1.0, 0.0, 0.0]), &g).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn test_cross_rlu_orthonormal() {
        let x = Vector::from([1.0, 2.0, 3.0]);
        let y = Vector::from([9.0, -8.0, 7.0]);
        let c = cross_rlu(&x, &y, &Matrix::identity(3)).unwrap();
        assert!(c.approx_eq(&x.cross(&y).unwrap(), 1e-9));
    }

    #[test]
    fn test_cross_rlu_lab_frame() {
        let b = basis();
        let x = Vector::from([1.0, 0.0, 0.0]);
        let y = Vector::from([0.0, 1.0, 1.0]);
        let c = cross_rlu(&x, &y, &b).unwrap();

        let lab = b.dot_vec(&c).unwrap();
        let expected = b.dot_vec(&x).unwrap().cross(&b.dot_vec(&y).unwrap()).unwrap();
        assert!(lab.approx_eq(&expected, 1e-9));
    }
}
