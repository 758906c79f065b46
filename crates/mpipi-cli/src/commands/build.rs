use crate::cli::BuildArgs;
use crate::config::SystemFile;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mpipi::core::forcefield::params::NonbondedTable;
use mpipi::core::forcefield::system::ParticleSystem;
use mpipi::engine::error::EngineError;
use mpipi::engine::progress::ProgressReporter;
use mpipi::workflows;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The written build result: initial coordinates plus the particle system.
#[derive(Serialize)]
struct BuildOutput<'a> {
    /// Initial bead positions, nm.
    positions: Vec<[f64; 3]>,
    system: &'a ParticleSystem,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let file = SystemFile::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = file.build_config(&args)?;
    let chains = file.placed_chains()?;

    info!("Loading nonbonded parameters from {:?}", &args.params);
    let table = NonbondedTable::load(&args.params).map_err(EngineError::from)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building system of {} chain(s)...", chains.len());
    let mut composed = workflows::build::compose_chains(
        &chains,
        &config.constants.spiral_spacing(),
        &reporter,
    )?;
    let system = workflows::build::run(
        &mut composed.topology,
        &composed.positions,
        &composed.regions,
        Arc::new(table),
        &config,
        &reporter,
    )?;

    let output = BuildOutput {
        positions: composed.positions.iter().map(|p| [p.x, p.y, p.z]).collect(),
        system: &system,
    };
    let content = toml::to_string(&output).map_err(|e| CliError::Other(e.into()))?;
    std::fs::write(&args.output, content)?;

    println!(
        "✓ {} particles, {} bonds, Debye length {:.4} nm, box side {:.2} nm",
        system.particle_count(),
        system.bonds.len(),
        system.electrostatics.debye_length,
        system.box_side()
    );
    println!("  System written to: {}", args.output.display());
    Ok(())
}
