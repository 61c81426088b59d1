//! Full instrument positions.
//!
//! [`TasCalculator`] combines the instrument configuration with a scattering
//! plane and computes all six axis angles for a point `(Q, E)`, or recovers
//! `(Q, E)` from a set of axis angles.

use tas_core::Result;
use tas_math::Vector;
use tracing::debug;

use crate::angles::{get_a3a4, get_hkl, ScatteringPlane};
use crate::config::TasConfig;
use crate::triangle::{get_a1a2, get_e, get_ki, get_monok, get_q};

/// Axis angles of the instrument (radians) and the wavevectors they select.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentPosition {
    /// Monochromator rotation.
    pub a1: f64,
    /// Monochromator scattering angle, `2 a1`.
    pub a2: f64,
    /// Sample rotation.
    pub a3: f64,
    /// Sample scattering angle.
    pub a4: f64,
    /// Analyzer rotation.
    pub a5: f64,
    /// Analyzer scattering angle, `2 a5`.
    pub a6: f64,
    /// Incident wavevector in Å⁻¹.
    pub ki: f64,
    /// Final wavevector in Å⁻¹.
    pub kf: f64,
    /// Distance of Q from the scattering plane in Å⁻¹.
    pub dist_plane: f64,
}

/// Momentum and energy transfer measured at an instrument position.
#[derive(Debug, Clone, PartialEq)]
pub struct QPosition {
    /// Incident wavevector in Å⁻¹.
    pub ki: f64,
    /// Final wavevector in Å⁻¹.
    pub kf: f64,
    /// Energy transfer in meV.
    pub e: f64,
    /// Modulus of Q in Å⁻¹.
    pub q_len: f64,
    /// Q in rlu.
    pub q_rlu: Vector,
}

/// Angle calculator for one instrument configuration and sample orientation.
#[derive(Debug, Clone)]
pub struct TasCalculator {
    config: TasConfig,
    plane: ScatteringPlane,
}

impl TasCalculator {
    /// Creates a calculator; the configuration is validated.
    pub fn new(config: TasConfig, plane: ScatteringPlane) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, plane })
    }

    /// Instrument configuration.
    #[inline]
    pub fn config(&self) -> &TasConfig {
        &self.config
    }

    /// Scattering plane.
    #[inline]
    pub fn plane(&self) -> &ScatteringPlane {
        &self.plane
    }

    /// Axis angles for `q_rlu` and energy transfer `e` (meV) at fixed `kf`.
    pub fn angles(&self, q_rlu: &Vector, e: f64, kf: f64) -> Result<InstrumentPosition> {
        let ki = get_ki(kf, e)?;
        self.angles_ki_kf(q_rlu, ki, kf)
    }

    /// Axis angles for `q_rlu` with explicit `ki` and `kf`.
    pub fn angles_ki_kf(&self, q_rlu: &Vector, ki: f64, kf: f64) -> Result<InstrumentPosition> {
        let (a1, a2) = get_a1a2(ki, self.config.d_mono)?;
        let (a5, a6) = get_a1a2(kf, self.config.d_ana)?;
        let sample = get_a3a4(
            ki,
            kf,
            q_rlu,
            &self.plane,
            self.config.sense_sample,
            self.config.a3_convention,
        )?;

        debug!(ki, kf, a1, a5, "Solved monochromator and analyzer angles");
        Ok(InstrumentPosition {
            a1,
            a2,
            a3: sample.a3,
            a4: sample.a4,
            a5,
            a6,
            ki,
            kf,
            dist_plane: sample.dist_plane,
        })
    }

    /// Recovers `(ki, kf, E, |Q|, Q)` from the axis angles a1, a3, a4 and a5.
    pub fn position_to_q(&self, pos: &InstrumentPosition) -> Result<QPosition> {
        let ki = get_monok(pos.a1, self.config.d_mono)?;
        let kf = get_monok(pos.a5, self.config.d_ana)?;
        let e = get_e(ki, kf);
        let q_len = get_q(ki, kf, pos.a4);
        let q_rlu = get_hkl(
            ki,
            kf,
            pos.a3,
            q_len,
            &self.plane,
            self.config.sense_sample,
            self.config.a3_convention,
        )?;

        Ok(QPosition {
            ki,
            kf,
            e,
            q_len,
            q_rlu,
        })
    }
}
