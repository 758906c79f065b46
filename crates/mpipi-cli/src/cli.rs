use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Kieran Russell, Jerelle A. Joseph, Rosana Collepardo-Guevara",
    version,
    about = "Mpipi CLI - builds coarse-grained Mpipi-Recharged force-field systems for proteins and RNA.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for elastic-network generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the particle-system description of a multi-chain system.
    Build(BuildArgs),
    /// Print the Debye screening length for the given conditions.
    Debye(DebyeArgs),
    /// Compute target slab box vectors for the chains of a system file.
    SlabBox(SlabBoxArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the system description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to the nonbonded parameter table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub params: PathBuf,

    /// Path for the output particle-system description (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the temperature in kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Override the ionic strength in millimolar.
    #[arg(short = 'I', long, value_name = "MM")]
    pub ionic_strength: Option<f64>,

    #[command(flatten)]
    pub periodicity: Periodicity,

    #[command(flatten)]
    pub com_motion: ComMotion,

    /// Load model constants from a separate TOML file.
    #[arg(long, value_name = "PATH")]
    pub constants: Option<PathBuf>,
}

/// Mutually exclusive flags controlling periodic boundary conditions.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct Periodicity {
    /// Force periodic boundary conditions.
    #[arg(long)]
    pub periodic: bool,
    /// Disable periodic boundary conditions.
    #[arg(long)]
    pub no_periodic: bool,
}

impl Periodicity {
    pub fn resolve(&self) -> Option<bool> {
        match (self.periodic, self.no_periodic) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Mutually exclusive flags controlling centre-of-mass motion removal.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct ComMotion {
    /// Remove centre-of-mass motion periodically.
    #[arg(long)]
    pub remove_com_motion: bool,
    /// Keep centre-of-mass motion.
    #[arg(long)]
    pub keep_com_motion: bool,
}

impl ComMotion {
    pub fn resolve(&self) -> Option<bool> {
        match (self.remove_com_motion, self.keep_com_motion) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `debye` subcommand.
#[derive(Args, Debug)]
pub struct DebyeArgs {
    /// Temperature in kelvin.
    #[arg(short = 'T', long, default_value_t = 280.0, value_name = "KELVIN")]
    pub temperature: f64,

    /// Ionic strength in millimolar.
    #[arg(short = 'I', long, default_value_t = 150.0, value_name = "MM")]
    pub ionic_strength: f64,
}

/// Arguments for the `slab-box` subcommand.
#[derive(Args, Debug)]
pub struct SlabBoxArgs {
    /// Path to the system description in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Ratio of the long box side to the short sides.
    #[arg(long, default_value_t = 6.0, value_name = "FLOAT")]
    pub long_side_scale: f64,

    /// Target density in g/cm³.
    #[arg(long, default_value_t = 0.1, value_name = "FLOAT")]
    pub density: f64,
}
