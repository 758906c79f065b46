use crate::core::coords::{BuiltChain, ChainSpec, SpiralSpacing};
use crate::core::forcefield::params::NonbondedTable;
use crate::core::forcefield::system::{ParticleSystem, assemble_system};
use crate::core::models::regions::GlobularRegionMap;
use crate::core::models::topology::Topology;
use crate::engine::config::BuildConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A chain and the translation applied to its centred coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedChain {
    pub spec: ChainSpec,
    pub offset: Vector3<f64>,
}

/// Several chains merged into one topology and position array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedSystem {
    pub topology: Topology,
    pub positions: Vec<Point3<f64>>,
    pub regions: GlobularRegionMap,
}

/// Builds every chain and concatenates them in the given order.
#[instrument(skip_all, name = "compose_chains")]
pub fn compose_chains(
    chains: &[PlacedChain],
    spacing: &SpiralSpacing,
    reporter: &ProgressReporter,
) -> Result<ComposedSystem, EngineError> {
    let mut composed = ComposedSystem::default();
    reporter.phase("Chain Construction", || {
        reporter.task(chains.iter(), |placed| -> Result<(), EngineError> {
            let BuiltChain {
                topology,
                positions,
                regions,
            } = placed.spec.build(spacing)?;

            composed.topology.append(&topology)?;
            composed
                .positions
                .extend(positions.into_iter().map(|p| p + placed.offset));
            if !regions.is_empty() {
                composed.regions.insert(placed.spec.id(), regions);
            }
            debug!(
                chain = placed.spec.id(),
                beads = topology.bead_count(),
                "Added chain"
            );
            Ok(())
        })
    })?;

    info!(
        chains = composed.topology.chains().len(),
        beads = composed.topology.bead_count(),
        "Composed system."
    );
    Ok(composed)
}

/// Builds the particle system for one configuration.
///
/// Generated bonds are registered on `topology` if it has none; see
/// [`assemble_system`].
#[instrument(skip_all, name = "build_workflow")]
pub fn run(
    topology: &mut Topology,
    positions: &[Point3<f64>],
    regions: &GlobularRegionMap,
    table: Arc<NonbondedTable>,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<ParticleSystem, EngineError> {
    reporter.phase("Preparation", || {
        if positions.len() != topology.bead_count() {
            return Err(EngineError::PositionCountMismatch {
                beads: topology.bead_count(),
                positions: positions.len(),
            });
        }
        info!(
            beads = topology.bead_count(),
            temperature = config.conditions.temperature,
            ionic_strength = config.conditions.ionic_strength,
            periodic = config.conditions.periodic,
            "Starting system build."
        );
        Ok(())
    })?;

    let system = reporter.phase("Assembly", || {
        let system = assemble_system(
            topology,
            positions,
            regions,
            &config.conditions,
            table,
            &config.constants.assembly(),
        )?;
        reporter.message(format!(
            "{} particles, {} bonds, Debye length {:.4} nm",
            system.particle_count(),
            system.bonds.len(),
            system.electrostatics.debye_length
        ));
        Ok::<_, EngineError>(system)
    })?;

    info!(
        particles = system.particle_count(),
        bonds = system.bonds.len(),
        box_side = system.box_side(),
        "System build finished."
    );
    Ok(system)
}

/// Builds one chain in isolation, as done before compacting it.
///
/// Returns the chain together with its non-periodic particle system; the
/// chain mass is [`ParticleSystem::total_mass`].
pub fn build_single_chain(
    spec: &ChainSpec,
    table: Arc<NonbondedTable>,
    config: &BuildConfig,
    reporter: &ProgressReporter,
) -> Result<(BuiltChain, ParticleSystem), EngineError> {
    let mut chain = spec.build(&config.constants.spiral_spacing())?;
    let mut regions = GlobularRegionMap::new();
    regions.insert(spec.id(), chain.regions.clone());
    let system = run(
        &mut chain.topology,
        &chain.positions,
        &regions,
        table,
        config,
        reporter,
    )?;
    Ok((chain, system))
}
