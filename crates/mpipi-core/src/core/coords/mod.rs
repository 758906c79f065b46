//! # Coordinate Generation
//!
//! Initial bead positions for single chains, plus the [`ChainSpec`] sum type
//! that pairs a chain's topology with the way its coordinates are produced.
//!
//! - [`spiral`] - Deterministic spiral layout for chains without a known structure
//! - [`structure`] - Reduction of an atomistic structure to one point per residue

pub mod spiral;
pub mod structure;

use crate::core::models::builder::create_chain_topology;
use crate::core::models::chain::ChainKind;
use crate::core::models::regions::GlobularRegions;
use crate::core::models::structure::AtomisticStructure;
use crate::core::models::topology::{Topology, TopologyError};
use nalgebra::{Point3, Vector3};
use spiral::{PROTEIN_SPIRAL_SPACING, RNA_SPIRAL_SPACING, spiral_coordinates};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error(
        "Sequence of chain '{chain_id}' does not match its structure: declared '{declared}', structure has '{found}'"
    )]
    SequenceMismatch {
        chain_id: String,
        declared: String,
        found: String,
    },
    #[error("Residue {residue_index} ({residue_name}) of chain '{chain_id}' has no CA atom")]
    MissingReferenceAtom {
        chain_id: String,
        residue_index: usize,
        residue_name: String,
    },
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Spiral spacing per chain kind, in nanometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralSpacing {
    pub protein: f64,
    pub rna: f64,
}

impl Default for SpiralSpacing {
    fn default() -> Self {
        Self {
            protein: PROTEIN_SPIRAL_SPACING,
            rna: RNA_SPIRAL_SPACING,
        }
    }
}

impl SpiralSpacing {
    pub fn for_kind(&self, kind: ChainKind) -> f64 {
        match kind {
            ChainKind::Protein => self.protein,
            ChainKind::Rna => self.rna,
        }
    }
}

/// How a single chain is described and where its coordinates come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainSpec {
    /// A fully flexible protein or RNA chain laid out on a spiral.
    Synthetic {
        id: String,
        kind: ChainKind,
        sequence: String,
    },
    /// A protein with folded domains whose coordinates come from a structure.
    Structured {
        id: String,
        sequence: String,
        regions: GlobularRegions,
        structure: AtomisticStructure,
    },
}

/// A single chain ready to be composed into a larger system.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltChain {
    pub topology: Topology,
    pub positions: Vec<Point3<f64>>,
    pub regions: GlobularRegions,
}

impl BuiltChain {
    /// Radius of gyration of the initial coordinates.
    pub fn radius_of_gyration(&self) -> f64 {
        radius_of_gyration(&self.positions)
    }
}

impl ChainSpec {
    pub fn id(&self) -> &str {
        match self {
            ChainSpec::Synthetic { id, .. } | ChainSpec::Structured { id, .. } => id,
        }
    }

    pub fn kind(&self) -> ChainKind {
        match self {
            ChainSpec::Synthetic { kind, .. } => *kind,
            ChainSpec::Structured { .. } => ChainKind::Protein,
        }
    }

    pub fn sequence(&self) -> &str {
        match self {
            ChainSpec::Synthetic { sequence, .. } | ChainSpec::Structured { sequence, .. } => sequence,
        }
    }

    /// Rigid domains of the chain; synthetic chains have none.
    pub fn regions(&self) -> GlobularRegions {
        match self {
            ChainSpec::Synthetic { .. } => GlobularRegions::default(),
            ChainSpec::Structured { regions, .. } => regions.clone(),
        }
    }

    /// Builds the chain's topology and centred initial coordinates.
    pub fn build(&self, spacing: &SpiralSpacing) -> Result<BuiltChain, CoordinateError> {
        match self {
            ChainSpec::Synthetic { id, kind, sequence } => {
                let topology =
                    create_chain_topology(id, *kind, sequence, &GlobularRegions::default(), None)?;
                let positions = spiral_coordinates(topology.bead_count(), spacing.for_kind(*kind));
                Ok(BuiltChain {
                    topology,
                    positions,
                    regions: GlobularRegions::default(),
                })
            }
            ChainSpec::Structured {
                id,
                sequence,
                regions,
                structure,
            } => {
                let positions = structure::structure_coordinates(id, sequence, structure)?;
                let topology =
                    create_chain_topology(id, ChainKind::Protein, sequence, regions, None)?;
                Ok(BuiltChain {
                    topology,
                    positions,
                    regions: regions.clone(),
                })
            }
        }
    }
}

/// Mass-unweighted radius of gyration of a point set; zero when empty.
pub fn radius_of_gyration(points: &[Point3<f64>]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let n = points.len() as f64;
    let centre: Vector3<f64> = points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n;
    let mean_square = points
        .iter()
        .map(|p| (p.coords - centre).norm_squared())
        .sum::<f64>()
        / n;
    mean_square.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::StructureResidue;

    #[test]
    fn synthetic_protein_uses_protein_spacing() {
        let spec = ChainSpec::Synthetic {
            id: "A".to_string(),
            kind: ChainKind::Protein,
            sequence: "GGGGG".to_string(),
        };
        let chain = spec.build(&SpiralSpacing::default()).unwrap();
        assert_eq!(chain.topology.bead_count(), 5);
        assert_eq!(chain.positions.len(), 5);
        assert_eq!(chain.positions, spiral_coordinates(5, 0.381));
        assert!(chain.regions.is_empty());
    }

    #[test]
    fn synthetic_rna_uses_rna_spacing() {
        let spec = ChainSpec::Synthetic {
            id: "R".to_string(),
            kind: ChainKind::Rna,
            sequence: "UUUU".to_string(),
        };
        let chain = spec.build(&SpiralSpacing::default()).unwrap();
        assert_eq!(chain.positions, spiral_coordinates(4, 0.50));
    }

    #[test]
    fn synthetic_chain_with_invalid_symbol_fails() {
        let spec = ChainSpec::Synthetic {
            id: "R".to_string(),
            kind: ChainKind::Rna,
            sequence: "UUA".to_string(),
        };
        assert!(matches!(
            spec.build(&SpiralSpacing::default()),
            Err(CoordinateError::Topology(TopologyError::InvalidSequence { .. }))
        ));
    }

    #[test]
    fn structured_chain_tags_rigid_beads_and_uses_structure_positions() {
        let structure = AtomisticStructure::new(
            ["MET", "LYS", "VAL"]
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    StructureResidue::new(name).with_atom("CA", Point3::new(i as f64 * 0.38, 0.0, 0.0))
                })
                .collect(),
        );
        let spec = ChainSpec::Structured {
            id: "A".to_string(),
            sequence: "MKV".to_string(),
            regions: GlobularRegions::new(vec![1usize, 2]),
            structure,
        };
        let chain = spec.build(&SpiralSpacing::default()).unwrap();
        let rigid: Vec<bool> = chain.topology.beads().iter().map(|b| b.is_rigid()).collect();
        assert_eq!(rigid, vec![false, true, true]);
        assert!((chain.positions[0].x + 0.38).abs() < 1e-12);
    }

    #[test]
    fn radius_of_gyration_of_symmetric_pair() {
        let points = [Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!((radius_of_gyration(&points) - 1.0).abs() < 1e-12);
        assert_eq!(radius_of_gyration(&[]), 0.0);
    }
}
