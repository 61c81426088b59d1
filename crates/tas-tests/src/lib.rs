//! Integration tests for TAS-RS crates.
//!
//! This crate contains end-to-end tests that exercise the linear algebra in
//! `tas-math` through the lattice and angle calculations of `tas-calc`.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;
    use tas_calc::triangle::{get_ki, get_q};
    use tas_calc::{
        get_a3a4, get_hkl, A3Convention, Lattice, ScatteringPlane, TasCalculator, TasConfig,
    };
    use tas_core::{deg_to_rad, rad_to_deg};
    use tas_math::{cross_rlu, dot_metric, get_metric, rotate, Matrix, Vector};

    const CONVENTIONS: [A3Convention; 3] = [
        A3Convention::Sics,
        A3Convention::QAlongOrient,
        A3Convention::KiAlongOrient,
    ];

    /// Cubic, hexagonal, monoclinic and triclinic cells.
    fn lattices() -> Vec<Lattice> {
        [
            ([5.0, 5.0, 5.0], [90.0, 90.0, 90.0]),
            ([3.8, 3.8, 6.2], [90.0, 90.0, 120.0]),
            ([4.2, 5.1, 6.3], [90.0, 105.0, 90.0]),
            ([5.0, 6.0, 7.0], [80.0, 95.0, 100.0]),
        ]
        .into_iter()
        .map(|(l, a)| Lattice::from_degrees(l, a).unwrap())
        .collect()
    }

    fn reference_plane() -> ScatteringPlane {
        let b = Lattice::from_degrees([5.0, 5.0, 5.0], [90.0, 90.0, 60.0])
            .unwrap()
            .b_matrix()
            .unwrap();
        ScatteringPlane::new(
            b,
            Vector::from([1.0, 0.0, 0.0]),
            Vector::from([-1.0 / 3.0, -2.0 / 3.0, 2.0 / 3.0]),
        )
        .unwrap()
    }

    // ========================================================================
    // Linear algebra
    // ========================================================================

    fn test_matrices() -> Vec<Matrix> {
        vec![
            Matrix::from([[1.0, 2.0], [3.0, 4.0]]),
            Matrix::from([[1.0, -2.0, 3.0], [4.0, 5.0, -6.0], [7.0, 8.0, 9.0]]),
            Matrix::from([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 4.0]]),
            Matrix::from([
                [2.0, 1.0, 0.0, 3.0],
                [1.0, 4.0, 1.0, 0.0],
                [0.0, 2.0, 5.0, 1.0],
                [1.0, 0.0, 2.0, 3.0],
            ]),
        ]
    }

    #[test]
    fn test_det_fixtures() {
        let m = test_matrices();
        assert_abs_diff_eq!(m[0].det().unwrap(), -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[1].det().unwrap(), 240.0, epsilon = 1e-9);
    }

    #[test]
    fn test_det_transpose() {
        for m in test_matrices() {
            assert_abs_diff_eq!(m.det().unwrap(), m.transpose().det().unwrap(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_products() {
        for m in test_matrices() {
            let n = m.nrows();
            let inv = m.inv().unwrap();
            assert!(m.dot(&inv).unwrap().approx_eq(&Matrix::identity(n), 1e-9));
            assert!(inv.dot(&m).unwrap().approx_eq(&Matrix::identity(n), 1e-9));
            assert_abs_diff_eq!(
                inv.det().unwrap() * m.det().unwrap(),
                1.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_singular_vs_near_singular() {
        let singular = Matrix::from([[1.0, 2.0], [2.0, 4.0]]);
        assert!(matches!(singular.inv(), Err(tas_core::Error::SingularMatrix { .. })));

        let near = Matrix::from([[1.0, 2.0], [2.0, 4.0 + 1e-9]]);
        let inv = near.inv().unwrap();
        assert!(inv.is_finite());
        assert!(near.dot(&inv).unwrap().approx_eq(&Matrix::identity(2), 1e-5));
    }

    #[test]
    fn test_matmul_associative() {
        let a = Matrix::from([[1.0, 2.0, 0.0], [0.0, 1.0, -1.0], [3.0, 0.0, 1.0]]);
        let b = Matrix::from([[2.0, 1.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 2.0]]);
        let x = Vector::from([0.5, -1.0, 2.0]);
        let lhs = a.dot(&b).unwrap().dot_vec(&x).unwrap();
        let rhs = a.dot_vec(&b.dot_vec(&x).unwrap()).unwrap();
        assert!(lhs.approx_eq(&rhs, 1e-12));
        // (AB)ᵗ = BᵗAᵗ
        let abt = a.dot(&b).unwrap().transpose();
        let btat = b.transpose().dot(&a.transpose()).unwrap();
        assert!(abt.approx_eq(&btat, 1e-12));
    }

    #[test]
    fn test_rotation_properties() {
        let axis = Vector::from([1.0, 1.0, 0.5]);
        let v = Vector::from([0.3, -2.0, 1.0]);
        for k in 0..12 {
            let phi = deg_to_rad(k as f64 * 30.0);
            let r = rotate(&axis, &v, phi).unwrap();
            assert_abs_diff_eq!(r.norm_2(), v.norm_2(), epsilon = 1e-12);
            // component along the axis is preserved
            let n = axis.normalize("axis").unwrap();
            assert_abs_diff_eq!(r.dot(&n).unwrap(), v.dot(&n).unwrap(), epsilon = 1e-12);
        }
        assert!(rotate(&axis, &v, 2.0 * PI).unwrap().approx_eq(&v, 1e-12));
        // rotations compose
        let r1 = rotate(&axis, &rotate(&axis, &v, 0.4).unwrap(), 0.7).unwrap();
        assert!(r1.approx_eq(&rotate(&axis, &v, 1.1).unwrap(), 1e-12));
    }

    // ========================================================================
    // Lattice geometry
    // ========================================================================

    #[test]
    fn test_metric_positive_definite() {
        let probes = [
            Vector::from([1.0, 0.0, 0.0]),
            Vector::from([1.0, -1.0, 0.0]),
            Vector::from([0.3, 2.0, -1.5]),
            Vector::from([-1.0, -1.0, -1.0]),
        ];
        for lattice in lattices() {
            let g = lattice.metric().unwrap();
            assert!(g.approx_eq(&g.transpose(), 1e-12));
            assert!(g.det().unwrap() > 0.0);
            for x in &probes {
                assert!(dot_metric(x, x, &g).unwrap() > 0.0);
            }
        }
    }

    #[test]
    fn test_reciprocity() {
        for lattice in lattices() {
            let a = lattice.a_matrix().unwrap();
            let b = lattice.b_matrix().unwrap();
            let prod = a.transpose().dot(&b).unwrap();
            assert!(prod.approx_eq(&Matrix::identity(3).scale(2.0 * PI), 1e-9));

            // reciprocal volume
            let vol = lattice.volume().unwrap();
            assert_abs_diff_eq!(
                b.det().unwrap(),
                (2.0 * PI).powi(3) / vol,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_cross_rlu_in_lab_frame() {
        let a = Vector::from([1.0, 0.0, 2.0]);
        let c = Vector::from([0.5, -1.0, 1.0]);
        for lattice in lattices() {
            let b = lattice.b_matrix().unwrap();
            let x = cross_rlu(&a, &c, &b).unwrap();
            let lab = b.dot_vec(&a).unwrap().cross(&b.dot_vec(&c).unwrap()).unwrap();
            assert!(b.dot_vec(&x).unwrap().approx_eq(&lab, 1e-9));

            // perpendicular to both factors under the metric
            let g = get_metric(&b).unwrap();
            assert_abs_diff_eq!(dot_metric(&x, &a, &g).unwrap(), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(dot_metric(&x, &c, &g).unwrap(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_reference_b_matrix() {
        let b = Lattice::from_degrees([5.0, 5.0, 5.0], [90.0, 90.0, 60.0])
            .unwrap()
            .b_matrix()
            .unwrap();
        let expected = Matrix::from([
            [1.2566370614359172, 0.0, 0.0],
            [-0.7255197456936874, 1.4510394913873745, 0.0],
            [0.0, 0.0, 1.2566370614359172],
        ]);
        assert!(b.approx_eq(&expected, 1e-12));
    }

    // ========================================================================
    // Angle calculation
    // ========================================================================

    #[test]
    fn test_reference_position() {
        let kf = 2.662;
        let ki = get_ki(kf, 2.0).unwrap();
        let q = Vector::from([1.0, 2.0, 2.0]);
        let plane = reference_plane();

        let angles = get_a3a4(ki, kf, &q, &plane, 1.0, A3Convention::KiAlongOrient).unwrap();
        assert_abs_diff_eq!(rad_to_deg(angles.a4), 80.457, epsilon = 1e-3);
        assert_abs_diff_eq!(rad_to_deg(angles.a3), 42.389, epsilon = 1e-3);
        assert_abs_diff_eq!(angles.dist_plane, 0.0, epsilon = 1e-9);

        let q_len = get_q(ki, kf, angles.a4);
        let hkl = get_hkl(ki, kf, angles.a3, q_len, &plane, 1.0, A3Convention::KiAlongOrient).unwrap();
        assert!(hkl.approx_eq(&q, 1e-4));
    }

    #[test]
    fn test_forward_inverse_roundtrip() {
        let kf = 2.662;
        let qs = [
            Vector::from([1.0, 1.0, 0.0]),
            Vector::from([0.5, -0.3, 0.0]),
            Vector::from([1.2, 0.4, 0.0]),
            Vector::from([-0.7, 0.9, 0.0]),
        ];

        for lattice in lattices() {
            let b = lattice.b_matrix().unwrap();
            let plane = ScatteringPlane::from_orients(
                b,
                Vector::from([1.0, 0.0, 0.0]),
                Vector::from([0.0, 1.0, 0.0]),
            )
            .unwrap();

            for e in [-1.0, 0.0, 2.0] {
                let ki = get_ki(kf, e).unwrap();
                for sense in [1.0, -1.0] {
                    for convention in CONVENTIONS {
                        for q in &qs {
                            let angles = get_a3a4(ki, kf, q, &plane, sense, convention).unwrap();
                            assert_abs_diff_eq!(angles.dist_plane, 0.0, epsilon = 1e-9);
                            assert_eq!(angles.a4.signum(), sense);

                            let q_len = get_q(ki, kf, angles.a4);
                            let hkl = get_hkl(ki, kf, angles.a3, q_len, &plane, sense, convention)
                                .unwrap();
                            assert!(
                                hkl.approx_eq(q, 1e-6),
                                "{:?} -> {:?} (sense {sense}, {convention:?})",
                                q.as_slice(),
                                hkl.as_slice()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_calculator_with_yaml_config() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "d_mono: 3.355\nd_ana: 3.355\nsense_sample: -1\na3_convention: sics").unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        let config = TasConfig::from_yaml_str(&text).unwrap();

        let calc = TasCalculator::new(config, reference_plane()).unwrap();
        let q = Vector::from([1.0, 2.0, 2.0]);
        let pos = calc.angles(&q, 2.0, 2.662).unwrap();
        assert_abs_diff_eq!(rad_to_deg(pos.a4), -80.457, epsilon = 1e-3);

        let back = calc.position_to_q(&pos).unwrap();
        assert_abs_diff_eq!(back.e, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.ki, pos.ki, epsilon = 1e-9);
        assert!(back.q_rlu.approx_eq(&q, 1e-6));
    }

    #[test]
    fn test_unreachable_reports_domain() {
        let plane = reference_plane();
        let q = Vector::from([3.0, 6.0, 6.0]);
        let err = get_a3a4(1.5, 1.5, &q, &plane, 1.0, A3Convention::Sics).unwrap_err();
        assert!(err.is_domain_error());
    }
}
