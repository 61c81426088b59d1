//! tas - Triple-axis spectrometer angle calculator
//!
//! Computes instrument angles for a momentum/energy transfer and recovers
//! Q from instrument angles.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tas")]
#[command(author, version, about = "Triple-axis spectrometer angle calculator")]
#[command(long_about = "
Angle calculator for triple-axis neutron spectrometers.
Lengths in Å, wavevectors in 1/Å, energies in meV, angles in degrees.

Examples:
  tas lattice --lattice 5,5,5 --angles 90,90,60
  tas angles --lattice 5,5,5 --angles 90,90,60 --orient1 1,0,0 --orient2 0,1,0 --q 1,1,0 -E 2 --kf 2.662
  tas hkl --lattice 5,5,5 --angles 90,90,60 --orient1 1,0,0 --orient2 0,1,0 --a3 42.39 --a4 80.46 --ki 2.834 --kf 2.662
  tas --config instrument.yaml angles ...
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Instrument configuration (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Instrument angles for Q (rlu) and energy transfer
    #[command(visible_alias = "a")]
    Angles(AnglesArgs),

    /// Q (rlu) and energy transfer from instrument angles
    Hkl(HklArgs),

    /// Direct and reciprocal bases of a lattice
    #[command(visible_alias = "l")]
    Lattice(LatticeArgs),
}

/// Unit cell.
#[derive(Args, Clone)]
struct CellArgs {
    /// Lattice constants a,b,c in Å
    #[arg(long, default_value = "5,5,5")]
    lattice: String,

    /// Lattice angles alpha,beta,gamma in degrees
    #[arg(long, default_value = "90,90,90")]
    angles: String,
}

/// Unit cell and scattering plane.
#[derive(Args, Clone)]
struct SampleArgs {
    #[command(flatten)]
    cell: CellArgs,

    /// First orientation reflection (rlu)
    #[arg(long, default_value = "1,0,0")]
    orient1: String,

    /// Second orientation reflection (rlu)
    #[arg(long, default_value = "0,1,0")]
    orient2: String,
}

/// Instrument settings overriding the configuration file.
#[derive(Args, Clone, Default)]
struct InstrumentArgs {
    /// Monochromator d-spacing in Å
    #[arg(long)]
    d_mono: Option<f64>,

    /// Analyzer d-spacing in Å
    #[arg(long)]
    d_ana: Option<f64>,

    /// Scattering sense at the sample (+1 or -1)
    #[arg(long, allow_hyphen_values = true)]
    sense: Option<f64>,

    /// a3 convention: sics, q-along-orient (takin), ki-along-orient (nomad)
    #[arg(long)]
    convention: Option<String>,
}

#[derive(Args)]
struct AnglesArgs {
    #[command(flatten)]
    sample: SampleArgs,

    #[command(flatten)]
    instrument: InstrumentArgs,

    /// Momentum transfer h,k,l (rlu)
    #[arg(short, long, allow_hyphen_values = true)]
    q: String,

    /// Energy transfer in meV
    #[arg(short = 'E', long, default_value = "0", allow_hyphen_values = true)]
    energy: f64,

    /// Fixed final wavevector in 1/Å
    #[arg(long, default_value = "2.662")]
    kf: f64,
}

#[derive(Args)]
struct HklArgs {
    #[command(flatten)]
    sample: SampleArgs,

    #[command(flatten)]
    instrument: InstrumentArgs,

    /// Sample rotation a3 in degrees
    #[arg(long, allow_hyphen_values = true)]
    a3: f64,

    /// Scattering angle a4 in degrees
    #[arg(long, allow_hyphen_values = true)]
    a4: f64,

    /// Incident wavevector in 1/Å
    #[arg(long)]
    ki: f64,

    /// Final wavevector in 1/Å
    #[arg(long)]
    kf: f64,
}

#[derive(Args)]
struct LatticeArgs {
    #[command(flatten)]
    cell: CellArgs,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Angles(args) => commands::angles::run(args, cli.config.as_deref(), cli.verbose),
        Commands::Hkl(args) => commands::hkl::run(args, cli.config.as_deref(), cli.verbose),
        Commands::Lattice(args) => commands::lattice::run(args, cli.verbose),
    }
}
