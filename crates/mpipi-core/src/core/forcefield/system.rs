use super::bonded::{BondedError, BondedParams, HarmonicBond, generate_bonds};
use super::params::{NonbondedTable, ShortRangeParams};
use super::potentials::{screened_coulomb, short_range_cutoff, structural_factor, wang_frenkel};
use super::screening::{ScreeningError, debye_length};
use crate::core::coords::radius_of_gyration;
use crate::core::models::regions::GlobularRegionMap;
use crate::core::models::residue::ResidueType;
use crate::core::models::topology::{Bond, Topology, TopologyError};
use nalgebra::Point3;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum ratio of box side to the largest chain radius of gyration.
pub const MIN_BOX_TO_RG_RATIO: f64 = 2.25;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Bonded term generation failed: {0}")]
    Bonded(#[from] BondedError),
    #[error("Invalid solution conditions: {0}")]
    Screening(#[from] ScreeningError),
    #[error("Failed to register bonds on the topology: {0}")]
    Topology(#[from] TopologyError),
}

/// Solution conditions and global switches for one build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    /// Temperature, K.
    pub temperature: f64,
    /// Ionic strength, mM.
    pub ionic_strength: f64,
    pub periodic: bool,
    pub remove_com_motion: bool,
}

/// Model constants used when assembling a particle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyParams {
    pub bonded: BondedParams,
    /// Upper bound on the short-range pair cutoff, nm.
    pub short_range_cutoff: f64,
    pub electrostatic_cutoff: f64,
    /// Short-range scaling for a pair of rigid beads.
    pub rigid_scaling: f64,
    pub box_padding: f64,
    /// Steps between centre-of-mass motion removals.
    pub com_interval: u32,
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            bonded: BondedParams::default(),
            short_range_cutoff: 2.5,
            electrostatic_cutoff: 3.5,
            rigid_scaling: 0.7,
            box_padding: 50.0,
            com_interval: 1000,
        }
    }
}

/// Per-particle parameters of the short-range term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShortRangeParticle {
    pub type_index: usize,
    pub rigid: bool,
}

/// Tabulated Wang–Frenkel term.
#[derive(Debug, Clone, Serialize)]
pub struct ShortRangeTerm {
    pub cutoff: f64,
    pub rigid_scaling: f64,
    pub force_group: u32,
    pub particles: Vec<ShortRangeParticle>,
    pub exclusions: Vec<Bond>,
    #[serde(skip)]
    table: Arc<NonbondedTable>,
}

impl ShortRangeTerm {
    fn types(&self, a: usize, b: usize) -> (ResidueType, ResidueType) {
        (
            ResidueType::ALL[self.particles[a].type_index],
            ResidueType::ALL[self.particles[b].type_index],
        )
    }

    /// Table parameters of particles `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is not a particle index of the system; the same
    /// holds for every pair accessor of both nonbonded terms.
    pub fn pair_params(&self, a: usize, b: usize) -> ShortRangeParams {
        let (ta, tb) = self.types(a, b);
        self.table.short_range(ta, tb)
    }

    pub fn structural_factor(&self, a: usize, b: usize) -> f64 {
        structural_factor(self.particles[a].rigid, self.particles[b].rigid, self.rigid_scaling)
    }

    /// Distance beyond which the pair does not interact.
    pub fn pair_cutoff(&self, a: usize, b: usize) -> f64 {
        short_range_cutoff(self.pair_params(a, b).size, self.cutoff)
    }

    /// Pair energy at distance `dist`, kJ/mol. Exclusions are not consulted.
    pub fn energy(&self, a: usize, b: usize, dist: f64) -> f64 {
        if dist >= self.cutoff {
            return 0.0;
        }
        wang_frenkel(dist, &self.pair_params(a, b), self.structural_factor(a, b))
    }
}

/// Tabulated screened-Coulomb term.
#[derive(Debug, Clone, Serialize)]
pub struct ElectrostaticTerm {
    pub cutoff: f64,
    pub debye_length: f64,
    /// Inverse screening length, nm⁻¹.
    pub kappa: f64,
    pub force_group: u32,
    pub type_indices: Vec<usize>,
    pub exclusions: Vec<Bond>,
    #[serde(skip)]
    table: Arc<NonbondedTable>,
}

impl ElectrostaticTerm {
    /// Prefactor of particles `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is not a particle index of the system.
    pub fn prefactor(&self, a: usize, b: usize) -> f64 {
        self.table.prefactor(
            ResidueType::ALL[self.type_indices[a]],
            ResidueType::ALL[self.type_indices[b]],
        )
    }

    pub fn energy(&self, a: usize, b: usize, dist: f64) -> f64 {
        if dist >= self.cutoff {
            return 0.0;
        }
        screened_coulomb(dist, self.prefactor(a, b), self.kappa)
    }
}

/// Removes global centre-of-mass motion every `interval` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MomentumRemover {
    pub interval: u32,
}

/// Everything a dynamics engine needs to simulate the system.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleSystem {
    pub particle_names: Vec<String>,
    /// Particle masses, Da.
    pub masses: Vec<f64>,
    pub periodic: bool,
    /// Cube box vectors, nm; recorded even when `periodic` is false.
    pub box_vectors: [[f64; 3]; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momentum_remover: Option<MomentumRemover>,
    pub bonds: Vec<HarmonicBond>,
    pub short_range: ShortRangeTerm,
    pub electrostatics: ElectrostaticTerm,
    pub parameter_table: Arc<NonbondedTable>,
}

impl ParticleSystem {
    pub fn particle_count(&self) -> usize {
        self.masses.len()
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    pub fn box_side(&self) -> f64 {
        self.box_vectors[0][0]
    }
}

/// Builds the complete particle system for one configuration.
///
/// When `topology` carries no bonds yet, the generated bond pairs are
/// registered on it, which seals it. A topology that already carries bonds
/// is left untouched; the system always uses the freshly generated bonds and
/// derives its exclusions from them.
pub fn assemble_system(
    topology: &mut Topology,
    positions: &[Point3<f64>],
    regions: &GlobularRegionMap,
    conditions: &Conditions,
    table: Arc<NonbondedTable>,
    params: &AssemblyParams,
) -> Result<ParticleSystem, AssemblyError> {
    let debye = debye_length(conditions.temperature, conditions.ionic_strength)?;
    let bonds = generate_bonds(topology, positions, regions, &params.bonded)?;
    register_or_compare(topology, &bonds)?;

    let beads = topology.beads();
    let masses: Vec<f64> = beads.iter().map(|b| b.mass()).collect();
    let particle_names: Vec<String> = beads.iter().map(|b| b.name()).collect();
    let type_indices: Vec<usize> = beads.iter().map(|b| b.residue_type.table_index()).collect();
    let rigid = rigid_flags(topology, regions);

    let exclusions: Vec<Bond> = bonds
        .iter()
        .map(HarmonicBond::pair)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let short_range = ShortRangeTerm {
        cutoff: params.short_range_cutoff,
        rigid_scaling: params.rigid_scaling,
        force_group: 0,
        particles: type_indices
            .iter()
            .zip(&rigid)
            .map(|(&type_index, &rigid)| ShortRangeParticle { type_index, rigid })
            .collect(),
        exclusions: exclusions.clone(),
        table: Arc::clone(&table),
    };

    let electrostatics = ElectrostaticTerm {
        cutoff: params.electrostatic_cutoff,
        debye_length: debye,
        kappa: 1.0 / debye,
        force_group: 1,
        type_indices,
        exclusions,
        table: Arc::clone(&table),
    };

    let side = max_span(positions) + params.box_padding;
    if conditions.periodic {
        check_box_against_chains(topology, positions, side);
    }

    debug!(
        particles = masses.len(),
        bonds = bonds.len(),
        debye_length = debye,
        box_side = side,
        "Assembled particle system"
    );

    Ok(ParticleSystem {
        particle_names,
        masses,
        periodic: conditions.periodic,
        box_vectors: cube(side),
        momentum_remover: conditions.remove_com_motion.then_some(MomentumRemover {
            interval: params.com_interval,
        }),
        bonds,
        short_range,
        electrostatics,
        parameter_table: table,
    })
}

fn register_or_compare(topology: &mut Topology, bonds: &[HarmonicBond]) -> Result<(), TopologyError> {
    if topology.bonds().is_empty() && !topology.is_sealed() {
        return topology.register_bonds(bonds.iter().map(HarmonicBond::pair));
    }
    let existing: BTreeSet<Bond> = topology.bonds().iter().copied().collect();
    let generated: BTreeSet<Bond> = bonds.iter().map(HarmonicBond::pair).collect();
    if existing != generated {
        warn!(
            registered = existing.len(),
            generated = generated.len(),
            "Topology already carries a different bond set; it was left unchanged"
        );
    }
    Ok(())
}

/// Rigid flag per bead, taken from the region map.
fn rigid_flags(topology: &Topology, regions: &GlobularRegionMap) -> Vec<bool> {
    let mut flags = vec![false; topology.bead_count()];
    for chain in topology.chains() {
        if let Some(chain_regions) = regions.get(&chain.id) {
            for local in chain_regions.flattened() {
                if let Some(global) = chain.global_index(local) {
                    flags[global] = true;
                }
            }
        }
    }
    let disagreeing = topology
        .beads()
        .iter()
        .zip(&flags)
        .filter(|(bead, rigid)| bead.is_rigid() != **rigid)
        .count();
    if disagreeing > 0 {
        debug!(
            beads = disagreeing,
            "Region map overrides the structural class recorded on the topology"
        );
    }
    flags
}

/// Largest extent of the positions along any axis.
pub fn max_span(positions: &[Point3<f64>]) -> f64 {
    (0..3)
        .map(|axis| {
            let (lo, hi) = positions
                .iter()
                .map(|p| p[axis])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
            if hi >= lo { hi - lo } else { 0.0 }
        })
        .fold(0.0, f64::max)
}

fn cube(side: f64) -> [[f64; 3]; 3] {
    [[side, 0.0, 0.0], [0.0, side, 0.0], [0.0, 0.0, side]]
}

/// Warns and returns `false` if `side` is below 2.25× the largest chain Rg.
fn check_box_against_chains(topology: &Topology, positions: &[Point3<f64>], side: f64) -> bool {
    let largest_rg = topology
        .chains()
        .iter()
        .map(|chain| radius_of_gyration(&positions[chain.bead_range()]))
        .fold(0.0, f64::max);
    let ok = side >= MIN_BOX_TO_RG_RATIO * largest_rg;
    if !ok {
        warn!(
            box_side = side,
            largest_rg,
            "Box side may be too small; it should be at least {MIN_BOX_TO_RG_RATIO} times the largest chain radius of gyration"
        );
    }
    ok
}
