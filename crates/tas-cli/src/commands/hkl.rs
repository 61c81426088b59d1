//! Hkl command - Q and E from instrument angles

use anyhow::{Context, Result};
use std::path::Path;
use tas_calc::{get_hkl, triangle::{get_e, get_q}};
use tas_core::deg_to_rad;
use tracing::debug;

use crate::HklArgs;

pub fn run(args: HklArgs, config: Option<&Path>, verbose: u8) -> Result<()> {
    let config = super::load_config(config, &args.instrument)?;
    let plane = super::build_plane(&args.sample)?;

    let a3 = deg_to_rad(args.a3);
    let a4 = deg_to_rad(args.a4);
    let q_len = get_q(args.ki, args.kf, a4);
    let e = get_e(args.ki, args.kf);
    debug!(q_len, e, "Scattering triangle");

    if verbose > 0 {
        println!("a3 = {}°, a4 = {}°, ki = {} 1/Å, kf = {} 1/Å", args.a3, args.a4, args.ki, args.kf);
    }

    let q = get_hkl(
        args.ki,
        args.kf,
        a3,
        q_len,
        &plane,
        config.sense_sample,
        config.a3_convention,
    )
    .with_context(|| format!("Cannot close scattering triangle at a4 = {}°", args.a4))?;

    println!("Q = {} rlu", super::format_vec(&q));
    println!("|Q| = {:.4} 1/Å", q_len);
    println!("E = {:.4} meV", e);

    Ok(())
}
