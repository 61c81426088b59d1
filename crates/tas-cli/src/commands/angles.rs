//! Angles command - instrument angles for Q and E

use anyhow::{Context, Result};
use std::path::Path;
use tas_calc::TasCalculator;
use tas_core::rad_to_deg;
use tas_math::Vector;
use tracing::{info, trace};

use crate::AnglesArgs;

pub fn run(args: AnglesArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    let config = super::load_config(config, &args.instrument)?;
    trace!(d_mono = config.d_mono, d_ana = config.d_ana, "Monochromator and analyzer");
    let plane = super::build_plane(&args.sample)?;
    let calc = TasCalculator::new(config, plane)?;

    let q = Vector::from(super::parse_vec3(&args.q)?);
    let q_len = calc.plane().q_length(&q)?;

    if verbose > 0 {
        println!("Q = {} rlu, |Q| = {:.4} 1/Å, E = {} meV, kf = {} 1/Å",
            super::format_vec(&q), q_len, args.energy, args.kf);
    }

    let pos = calc
        .angles(&q, args.energy, args.kf)
        .with_context(|| format!("Cannot reach Q = {} at E = {} meV", args.q, args.energy))?;

    info!(a3 = rad_to_deg(pos.a3), a4 = rad_to_deg(pos.a4), "Solved position");

    println!("a1 = {:10.4}°", rad_to_deg(pos.a1));
    println!("a2 = {:10.4}°", rad_to_deg(pos.a2));
    println!("a3 = {:10.4}°", rad_to_deg(pos.a3));
    println!("a4 = {:10.4}°", rad_to_deg(pos.a4));
    println!("a5 = {:10.4}°", rad_to_deg(pos.a5));
    println!("a6 = {:10.4}°", rad_to_deg(pos.a6));
    println!("ki = {:10.4} 1/Å", pos.ki);
    println!("kf = {:10.4} 1/Å", pos.kf);
    println!("|Q| = {:9.4} 1/Å", q_len);
    println!("distance to plane = {:.6} 1/Å", pos.dist_plane);

    Ok(())
}
