//! Scattering triangle and monochromator/analyzer relations.
//!
//! The incident and final wavevectors and the momentum transfer close a
//! triangle, `Q = ki - kf`:
//!
//! ```text
//!            kf
//!      +----------->
//!       \         /
//!    ki  \  a4   / Q
//!         \     /
//!          \psi/
//!           \ /
//! ```
//!
//! All moduli are in Å⁻¹, energies in meV and angles in radians.
//!
//! # Usage
//!
//! ```rust
//! use tas_calc::triangle::{get_a4, get_ki, get_q};
//!
//! let kf = 2.662;
//! let ki = get_ki(kf, 2.0).unwrap();
//! let a4 = get_a4(ki, kf, 3.0).unwrap();
//! assert!((get_q(ki, kf, a4) - 3.0).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use tas_core::{Error, Result, E_TO_K2};

/// Slack allowed on the argument of `asin`/`acos` before it is treated as
/// out of range.
const TRIG_EPS: f64 = 1e-9;

/// `acos` that reports arguments outside [-1, 1] as [`Error::Domain`].
fn checked_acos(what: &'static str, c: f64) -> Result<f64> {
    if c.is_nan() || c.abs() > 1.0 + TRIG_EPS {
        return Err(Error::domain(what, c));
    }
    Ok(c.clamp(-1.0, 1.0).acos())
}

/// `asin` that reports arguments outside [-1, 1] as [`Error::Domain`].
fn checked_asin(what: &'static str, s: f64) -> Result<f64> {
    if s.is_nan() || s.abs() > 1.0 + TRIG_EPS {
        return Err(Error::domain(what, s));
    }
    Ok(s.clamp(-1.0, 1.0).asin())
}

/// Rejects negative and non-finite moduli as [`Error::Domain`].
fn checked_modulus(what: &'static str, k: f64) -> Result<f64> {
    if !(k.is_finite() && k >= 0.0) {
        return Err(Error::domain(what, k));
    }
    Ok(k)
}

fn checked_sqrt(what: &'static str, x: f64) -> Result<f64> {
    if x.is_nan() || x < 0.0 {
        return Err(Error::domain(what, x));
    }
    Ok(x.sqrt())
}

/// Monochromator (or analyzer) wavevector to Bragg angle a1 (or a5).
///
/// `a1 = asin(π / (d k))` for a crystal with lattice spacing `d` in Å.
/// Fails with [`Error::Domain`] if `k` is negative or too small for the
/// given `d`.
pub fn get_a1(k: f64, d: f64) -> Result<f64> {
    checked_modulus("k", k)?;
    checked_asin("a1 (sin of Bragg angle)", PI / (d * k))
}

/// Monochromator (or analyzer) angles `(a1, a2)` with `a2 = 2 a1`.
pub fn get_a1a2(k: f64, d: f64) -> Result<(f64, f64)> {
    let a1 = get_a1(k, d)?;
    Ok((a1, 2.0 * a1))
}

/// Bragg angle a1 (or a5) to monochromator (or analyzer) wavevector.
///
/// `k = π / (d sin θ)`. Fails with [`Error::Domain`] if `sin θ` is zero.
pub fn get_monok(theta: f64, d: f64) -> Result<f64> {
    let s = theta.sin();
    if s == 0.0 {
        return Err(Error::domain("sin of Bragg angle", s));
    }
    Ok(PI / (d * s))
}

/// Scattering angle a4 from the triangle sides.
///
/// Fails with [`Error::Domain`] for negative moduli and if `Q` cannot be
/// reached with `ki` and `kf`.
pub fn get_a4(ki: f64, kf: f64, q: f64) -> Result<f64> {
    checked_modulus("ki", ki)?;
    checked_modulus("kf", kf)?;
    checked_modulus("Q", q)?;
    let c = (ki * ki + kf * kf - q * q) / (2.0 * ki * kf);
    checked_acos("a4 (cos of scattering angle)", c)
}

/// Modulus of Q from `ki`, `kf` and the scattering angle a4.
pub fn get_q(ki: f64, kf: f64, a4: f64) -> f64 {
    let c = a4.cos();
    // (ki - kf)² bounds the radicand from below; only rounding can push it negative
    (ki * ki + kf * kf - c * (2.0 * ki * kf)).max(0.0).sqrt()
}

/// Angle psi enclosed by `ki` and `Q`.
///
/// `sense` (±1) selects one of the two mirror-image triangles. Fails with
/// [`Error::Domain`] for negative moduli and if the triangle does not close.
pub fn get_psi(ki: f64, kf: f64, q: f64, sense: f64) -> Result<f64> {
    checked_modulus("ki", ki)?;
    checked_modulus("kf", kf)?;
    checked_modulus("Q", q)?;
    let c = (ki * ki + q * q - kf * kf) / (2.0 * ki * q);
    Ok(sense * checked_acos("psi (cos of angle between ki and Q)", c)?)
}

/// Incident wavevector from `kf` and energy transfer `E`.
///
/// Fails with [`Error::Domain`] for a negative `kf` or radicand.
pub fn get_ki(kf: f64, e: f64) -> Result<f64> {
    checked_modulus("kf", kf)?;
    checked_sqrt("ki² from kf and E", kf * kf + E_TO_K2 * e)
}

/// Final wavevector from `ki` and energy transfer `E`.
///
/// Fails with [`Error::Domain`] for a negative `ki` and if `E` exceeds the
/// incident energy.
pub fn get_kf(ki: f64, e: f64) -> Result<f64> {
    checked_modulus("ki", ki)?;
    checked_sqrt("kf² from ki and E", ki * ki - E_TO_K2 * e)
}

/// Energy transfer `E = (ki² - kf²) / E_TO_K2` in meV.
pub fn get_e(ki: f64, kf: f64) -> f64 {
    (ki * ki - kf * kf) / E_TO_K2
}
