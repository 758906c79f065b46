use crate::core::models::chain::ChainKind;
use crate::core::models::regions::GlobularRegionMap;
use crate::core::models::topology::{Bond, Topology};
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, PartialEq)]
pub enum BondedError {
    #[error("Expected one position per bead ({beads}), got {positions}")]
    PositionCountMismatch { beads: usize, positions: usize },
    #[error("Position of bead {0} is not finite")]
    NonFinitePosition(usize),
    #[error("Globular regions given for unknown chain '{0}'")]
    UnknownChain(String),
    #[error("Rigid-region index {index} is out of bounds for chain '{chain_id}' of length {length}")]
    RegionOutOfBounds {
        chain_id: String,
        index: usize,
        length: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondKind {
    /// Fixed-length bond between consecutive beads of a flexible segment.
    Backbone,
    /// Elastic-network bond inside a rigid domain, at its measured length.
    ElasticNetwork,
}

/// A harmonic bond `k/2·(r - length)²` between two global bead indices, `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonicBond {
    pub i: usize,
    pub j: usize,
    /// Equilibrium length, nm.
    pub length: f64,
    /// Force constant, kJ/mol/nm².
    pub k: f64,
    pub kind: BondKind,
}

impl HarmonicBond {
    pub fn pair(&self) -> Bond {
        Bond::new(self.i, self.j)
    }
}

/// Constants of the bonded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondedParams {
    pub backbone_k: f64,
    pub protein_bond_length: f64,
    pub rna_bond_length: f64,
    pub enm_cutoff: f64,
    pub enm_k: f64,
}

impl Default for BondedParams {
    fn default() -> Self {
        Self {
            backbone_k: 8031.0,
            protein_bond_length: 0.381,
            rna_bond_length: 0.500,
            enm_cutoff: 0.75,
            enm_k: 8031.0,
        }
    }
}

impl BondedParams {
    pub fn backbone_length(&self, kind: ChainKind) -> f64 {
        match kind {
            ChainKind::Protein => self.protein_bond_length,
            ChainKind::Rna => self.rna_bond_length,
        }
    }
}

/// Generates backbone and elastic-network bonds for a whole system.
///
/// Backbone bonds join consecutive beads of a chain unless both are rigid.
/// Elastic-network bonds join every pair of beads of the same rigid domain
/// that lie within `enm_cutoff` of each other. Every unordered pair appears
/// at most once; output order is deterministic.
pub fn generate_bonds(
    topology: &Topology,
    positions: &[Point3<f64>],
    regions: &GlobularRegionMap,
    params: &BondedParams,
) -> Result<Vec<HarmonicBond>, BondedError> {
    validate_inputs(topology, positions, regions)?;

    let mut bonds = backbone_bonds(topology, regions, params);
    let backbone_count = bonds.len();

    let domains = rigid_domains(topology, regions);
    bonds.extend(elastic_network_bonds(positions, &domains, params));

    let mut seen = HashSet::with_capacity(bonds.len());
    bonds.retain(|bond| seen.insert(bond.pair()));

    debug!(
        backbone = backbone_count,
        elastic_network = bonds.len() - backbone_count,
        domains = domains.len(),
        "Generated bonded terms"
    );
    Ok(bonds)
}

fn validate_inputs(
    topology: &Topology,
    positions: &[Point3<f64>],
    regions: &GlobularRegionMap,
) -> Result<(), BondedError> {
    if positions.len() != topology.bead_count() {
        return Err(BondedError::PositionCountMismatch {
            beads: topology.bead_count(),
            positions: positions.len(),
        });
    }
    if let Some(index) = positions
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        return Err(BondedError::NonFinitePosition(index));
    }
    for (chain_id, chain_regions) in regions.iter() {
        let chain = topology
            .find_chain(chain_id)
            .ok_or_else(|| BondedError::UnknownChain(chain_id.to_string()))?;
        if let Some(index) = chain_regions.first_out_of_bounds(chain.len()) {
            return Err(BondedError::RegionOutOfBounds {
                chain_id: chain_id.to_string(),
                index,
                length: chain.len(),
            });
        }
    }
    Ok(())
}

/// Backbone bonds for every consecutive pair that is not fully rigid.
pub fn backbone_bonds(
    topology: &Topology,
    regions: &GlobularRegionMap,
    params: &BondedParams,
) -> Vec<HarmonicBond> {
    let mut bonds = Vec::new();
    for chain in topology.chains() {
        let rigid: BTreeSet<usize> = regions
            .get(&chain.id)
            .map(|r| r.flattened())
            .unwrap_or_default();
        let length = params.backbone_length(chain.kind);
        let start = chain.bead_range().start;

        for local in 0..chain.len().saturating_sub(1) {
            if rigid.contains(&local) && rigid.contains(&(local + 1)) {
                continue;
            }
            bonds.push(HarmonicBond {
                i: start + local,
                j: start + local + 1,
                length,
                k: params.backbone_k,
                kind: BondKind::Backbone,
            });
        }
    }
    bonds
}

/// Each rigid domain as a sorted, duplicate-free list of global indices.
fn rigid_domains(topology: &Topology, regions: &GlobularRegionMap) -> Vec<Vec<usize>> {
    topology
        .chains()
        .iter()
        .filter_map(|chain| regions.get(&chain.id).map(|r| (chain, r)))
        .flat_map(|(chain, chain_regions)| {
            chain_regions.domains().iter().map(move |domain| {
                domain
                    .iter()
                    .filter_map(|&local| chain.global_index(local))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            })
        })
        .filter(|domain| domain.len() > 1)
        .collect()
}

fn elastic_network_bonds(
    positions: &[Point3<f64>],
    domains: &[Vec<usize>],
    params: &BondedParams,
) -> Vec<HarmonicBond> {
    if domains.is_empty() {
        return Vec::new();
    }

    let rigid_indices: Vec<usize> = domains
        .iter()
        .flatten()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let rigid_points: Vec<[f64; 3]> = rigid_indices
        .iter()
        .map(|&i| [positions[i].x, positions[i].y, positions[i].z])
        .collect();
    let kdtree: KdTree<f64, 3> = (&rigid_points).into();

    #[cfg(not(feature = "parallel"))]
    let iterator = domains.iter();

    #[cfg(feature = "parallel")]
    let iterator = domains.par_iter();

    let per_domain: Vec<Vec<HarmonicBond>> = iterator
        .map(|domain| domain_bonds(&kdtree, &rigid_indices, positions, domain, params))
        .collect();

    per_domain.into_iter().flatten().collect()
}

fn domain_bonds(
    kdtree: &KdTree<f64, 3>,
    rigid_indices: &[usize],
    positions: &[Point3<f64>],
    domain: &[usize],
    params: &BondedParams,
) -> Vec<HarmonicBond> {
    let cutoff_sq = params.enm_cutoff * params.enm_cutoff;
    let mut bonds = Vec::new();

    for &i in domain {
        let query = [positions[i].x, positions[i].y, positions[i].z];
        let mut partners: Vec<usize> = kdtree
            .within_unsorted::<SquaredEuclidean>(&query, cutoff_sq)
            .into_iter()
            .map(|neighbour| rigid_indices[neighbour.item as usize])
            .filter(|&j| j > i && domain.binary_search(&j).is_ok())
            .collect();
        partners.sort_unstable();

        for j in partners {
            let length = (positions[j] - positions[i]).norm();
            if length > params.enm_cutoff {
                continue;
            }
            bonds.push(HarmonicBond {
                i,
                j,
                length,
                k: params.enm_k,
                kind: BondKind::ElasticNetwork,
            });
        }
    }
    bonds
}
