//! Lattice command - direct and reciprocal bases

use anyhow::Result;

use crate::LatticeArgs;

pub fn run(args: LatticeArgs, verbose: u8) -> Result<()> {
    let lattice = super::build_lattice(&args.cell)?;

    if verbose > 0 {
        println!("Lattice: {} Å / {}°", args.cell.lattice, args.cell.angles);
    }

    super::print_matrix("A (Å)", &lattice.a_matrix()?);
    super::print_matrix("B (1/Å)", &lattice.b_matrix()?);
    super::print_matrix("Metric (1/Å²)", &lattice.metric()?);
    println!("Volume: {:.4} Å³", lattice.volume()?);

    Ok(())
}
