use thiserror::Error;

use super::config::ConfigError;
use crate::core::coords::CoordinateError;
use crate::core::forcefield::bonded::BondedError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::forcefield::screening::ScreeningError;
use crate::core::forcefield::system::AssemblyError;
use crate::core::models::topology::TopologyError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Coordinate generation failed: {0}")]
    Coordinates(#[from] CoordinateError),

    #[error("Invalid solution conditions: {0}")]
    Screening(#[from] ScreeningError),

    #[error("Failed to load nonbonded parameters: {0}")]
    Parameters(#[from] ParamLoadError),

    #[error("Bonded term generation failed: {0}")]
    Bonded(#[from] BondedError),

    #[error("System assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Expected one position per bead ({beads}), got {positions}")]
    PositionCountMismatch { beads: usize, positions: usize },
}
