//! Instrument configuration.
//!
//! [`TasConfig`] collects the instrument settings that stay fixed while
//! scanning: monochromator and analyzer d-spacings, the scattering sense at
//! the sample and the a3 zero-point convention.
//!
//! # YAML
//!
//! ```yaml
//! d_mono: 3.355
//! d_ana: 3.355
//! sense_sample: -1
//! a3_convention: q_along_orient
//! ```
//!
//! Missing keys fall back to [`TasConfig::default`].

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};
use tas_core::{Error, Result};

/// d-spacing of pyrolytic graphite (002) in Å.
pub const D_PG002: f64 = 3.355;

/// Zero point of the sample rotation axis a3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum A3Convention {
    /// No offset (SICS instrument control).
    Sics,
    /// Q along orient1 means a3 = a4 / 2.
    QAlongOrient,
    /// ki along orient1 means a3 = 0.
    #[default]
    KiAlongOrient,
}

impl A3Convention {
    /// Offset added to the sample angle a3, in radians.
    #[inline]
    pub fn offset(self) -> f64 {
        match self {
            Self::Sics => 0.0,
            Self::QAlongOrient => FRAC_PI_2,
            Self::KiAlongOrient => PI,
        }
    }

    /// Parses a convention name as used on the command line.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "sics" => Ok(Self::Sics),
            "q_along_orient" | "takin" => Ok(Self::QAlongOrient),
            "ki_along_orient" | "nomad" => Ok(Self::KiAlongOrient),
            other => Err(Error::config(format!("unknown a3 convention: {other}"))),
        }
    }
}

/// Fixed instrument settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TasConfig {
    /// Monochromator d-spacing in Å.
    pub d_mono: f64,
    /// Analyzer d-spacing in Å.
    pub d_ana: f64,
    /// Scattering sense at the sample, +1 (counter-clockwise) or -1.
    pub sense_sample: f64,
    /// Zero point of a3.
    pub a3_convention: A3Convention,
}

impl Default for TasConfig {
    fn default() -> Self {
        Self {
            d_mono: D_PG002,
            d_ana: D_PG002,
            sense_sample: 1.0,
            a3_convention: A3Convention::default(),
        }
    }
}

impl TasConfig {
    /// Checks d-spacings and scattering sense.
    pub fn validate(&self) -> Result<()> {
        for (name, d) in [("d_mono", self.d_mono), ("d_ana", self.d_ana)] {
            if !(d > 0.0) {
                return Err(Error::config(format!("{name} must be positive, got {d}")));
            }
        }
        if self.sense_sample != 1.0 && self.sense_sample != -1.0 {
            return Err(Error::config(format!(
                "sense_sample must be +1 or -1, got {}",
                self.sense_sample
            )));
        }
        Ok(())
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TasConfig::default();
        assert_eq!(config.d_mono, D_PG002);
        assert_eq!(config.a3_convention, A3Convention::KiAlongOrient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_offsets() {
        assert_eq!(A3Convention::Sics.offset(), 0.0);
        assert_eq!(A3Convention::QAlongOrient.offset(), FRAC_PI_2);
        assert_eq!(A3Convention::KiAlongOrient.offset(), PI);
    }

    #[test]
    fn test_parse_convention() {
        assert_eq!(A3Convention::parse("SICS").unwrap(), A3Convention::Sics);
        assert_eq!(A3Convention::parse("q-along-orient").unwrap(), A3Convention::QAlongOrient);
        assert_eq!(A3Convention::parse("nomad").unwrap(), A3Convention::KiAlongOrient);
        assert!(A3Convention::parse("mcstas").is_err());
    }

    #[test]
    fn test_yaml_partial() {
        let config = TasConfig::from_yaml_str("d_ana: 3.0\nsense_sample: -1\na3_convention: sics\n").unwrap();
        assert_eq!(config.d_ana, 3.0);
        assert_eq!(config.d_mono, D_PG002);
        assert_eq!(config.sense_sample, -1.0);
        assert_eq!(config.a3_convention, A3Convention::Sics);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TasConfig {
            d_mono: 3.437,
            a3_convention: A3Convention::QAlongOrient,
            ..Default::default()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(TasConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_invalid() {
        assert!(matches!(TasConfig::from_yaml_str("sense_sample: 0.5"), Err(Error::Config(_))));
        assert!(matches!(TasConfig::from_yaml_str("d_mono: -1"), Err(Error::Config(_))));
        assert!(matches!(TasConfig::from_yaml_str("a3_convention: [1, 2]"), Err(Error::Config(_))));
    }
}
