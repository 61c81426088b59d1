//! Physical constants used by the scattering formulas.

use std::f64::consts::PI;

/// Conversion factor between neutron energy and squared wavevector,
/// `E = k² / E_TO_K2`, in Å⁻²·meV⁻¹.
///
/// Derived from `2·m_n / ħ²` with CODATA constants:
///
/// ```text
/// hbar [meV s] = h / e * 1000 / (2 pi)
/// E_TO_K2      = 2 m_n / hbar² / e * 1000 * 1e-20
/// ```
pub const E_TO_K2: f64 = 0.482596406464;

/// Converts an angle in degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg / 180.0 * PI
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad / PI * 180.0
}
