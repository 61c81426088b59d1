//! CLI command implementations

pub mod angles;
pub mod hkl;
pub mod lattice;

use anyhow::{bail, Context, Result};
use std::path::Path;
use tas_calc::{A3Convention, Lattice, ScatteringPlane, TasConfig};
use tas_math::{Matrix, Vector};
use tracing::debug;

use crate::{CellArgs, InstrumentArgs, SampleArgs};

/// Parse a vector like "1,2,2" or "0.5, -1, 0"
pub fn parse_vec3(s: &str) -> Result<[f64; 3]> {
    let parts: Result<Vec<f64>, _> = s.split(',').map(|p| p.trim().parse::<f64>()).collect();
    let parts = parts.with_context(|| format!("Invalid vector: {s}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        _ => bail!("Expected 3 comma-separated values, got {}: {}", parts.len(), s),
    }
}

/// Load the instrument configuration and apply command line overrides
pub fn load_config(path: Option<&Path>, overrides: &InstrumentArgs) -> Result<TasConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            TasConfig::from_yaml_str(&text)
                .with_context(|| format!("Invalid config: {}", path.display()))?
        }
        None => TasConfig::default(),
    };

    if let Some(d) = overrides.d_mono {
        config.d_mono = d;
    }
    if let Some(d) = overrides.d_ana {
        config.d_ana = d;
    }
    if let Some(sense) = overrides.sense {
        config.sense_sample = sense;
    }
    if let Some(name) = &overrides.convention {
        config.a3_convention = A3Convention::parse(name)?;
    }
    config.validate()?;

    debug!(?config, "Instrument configuration");
    Ok(config)
}

/// Build the lattice from command line strings (degrees)
pub fn build_lattice(cell: &CellArgs) -> Result<Lattice> {
    let lengths = parse_vec3(&cell.lattice)?;
    let angles = parse_vec3(&cell.angles)?;
    Lattice::from_degrees(lengths, angles)
        .with_context(|| format!("Invalid lattice {} / {}", cell.lattice, cell.angles))
}

/// Build the scattering plane from the lattice and orientation reflections
pub fn build_plane(sample: &SampleArgs) -> Result<ScatteringPlane> {
    let b = build_lattice(&sample.cell)?.b_matrix()?;
    let orient1 = Vector::from(parse_vec3(&sample.orient1)?);
    let orient2 = Vector::from(parse_vec3(&sample.orient2)?);
    ScatteringPlane::from_orients(b, orient1, orient2).with_context(|| {
        format!("Invalid orientation {} / {}", sample.orient1, sample.orient2)
    })
}

/// Format a vector for display
pub fn format_vec(v: &Vector) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("({})", parts.join(", "))
}

/// Print a matrix row by row, indented
pub fn print_matrix(name: &str, m: &Matrix) {
    println!("{name}:");
    for row in m.rows() {
        let parts: Vec<String> = row.iter().map(|x| format!("{x:>10.5}")).collect();
        println!("  {}", parts.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,2,2").unwrap(), [1.0, 2.0, 2.0]);
        assert_eq!(parse_vec3(" 0.5, -1 ,0 ").unwrap(), [0.5, -1.0, 0.0]);
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,2").is_err());
    }

    #[test]
    fn test_load_config_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "d_mono: 3.437\nsense_sample: -1").unwrap();

        let overrides = InstrumentArgs {
            d_ana: Some(3.0),
            convention: Some("sics".into()),
            ..Default::default()
        };
        let config = load_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.d_mono, 3.437);
        assert_eq!(config.d_ana, 3.0);
        assert_eq!(config.sense_sample, -1.0);
        assert_eq!(config.a3_convention, A3Convention::Sics);
    }

    #[test]
    fn test_load_config_invalid() {
        let overrides = InstrumentArgs {
            sense: Some(2.0),
            ..Default::default()
        };
        assert!(load_config(None, &overrides).is_err());
        assert!(load_config(Some(Path::new("/nonexistent/tas.yaml")), &InstrumentArgs::default()).is_err());
    }

    #[test]
    fn test_build_plane() {
        let sample = SampleArgs {
            cell: CellArgs {
                lattice: "5,5,5".into(),
                angles: "90,90,60".into(),
            },
            orient1: "1,0,0".into(),
            orient2: "0,1,0".into(),
        };
        let plane = build_plane(&sample).unwrap();
        assert_eq!(plane.orient(), &Vector::from([1.0, 0.0, 0.0]));

        let collinear = SampleArgs {
            orient2: "2,0,0".into(),
            ..sample
        };
        assert!(build_plane(&collinear).is_err());
    }
}
