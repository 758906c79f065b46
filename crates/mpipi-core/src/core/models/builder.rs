use super::bead::{Bead, StructuralClass};
use super::chain::{Chain, ChainKind};
use super::regions::GlobularRegions;
use super::residue::ResidueType;
use super::topology::{Topology, TopologyError};
use std::collections::BTreeSet;

/// Appends validated chains to a topology.
pub struct TopologyBuilder {
    topology: Topology,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            topology: Topology::new(),
        }
    }

    /// Continues building on top of an existing topology.
    pub fn from_topology(topology: Topology) -> Self {
        Self { topology }
    }

    /// Adds one chain of beads in sequence order.
    ///
    /// Every symbol must belong to the alphabet of `kind`, and every rigid
    /// index must fall inside the chain. On error the topology is unchanged.
    pub fn add_chain(
        &mut self,
        chain_id: &str,
        kind: ChainKind,
        sequence: &str,
        regions: &GlobularRegions,
    ) -> Result<&mut Self, TopologyError> {
        if self.topology.find_chain(chain_id).is_some() {
            return Err(TopologyError::DuplicateChain(chain_id.to_string()));
        }

        let residue_types = parse_sequence(chain_id, kind, sequence)?;

        if let Some(index) = regions.first_out_of_bounds(residue_types.len()) {
            return Err(TopologyError::RegionOutOfBounds {
                chain_id: chain_id.to_string(),
                index,
                length: residue_types.len(),
            });
        }
        let rigid = regions.flattened();

        let chain_index = self.topology.chains.len();
        let first_bead = self.topology.bead_count();
        let mut chain = Chain::new(chain_id, kind, first_bead);

        let beads: Vec<Bead> = residue_types
            .into_iter()
            .enumerate()
            .map(|(local_index, residue_type)| Bead {
                residue_type,
                class: if rigid.contains(&local_index) {
                    StructuralClass::Rigid
                } else {
                    StructuralClass::Flexible
                },
                chain_index,
                local_index,
                global_index: first_bead + local_index,
            })
            .collect();

        chain.beads.end = first_bead + beads.len();
        self.topology.push_chain(chain, beads);
        Ok(self)
    }

    pub fn build(self) -> Topology {
        self.topology
    }
}

/// Converts a one-letter sequence into bead types for a chain of `kind`.
///
/// All offending symbols are reported, each once, in order of first
/// appearance.
pub fn parse_sequence(
    chain_id: &str,
    kind: ChainKind,
    sequence: &str,
) -> Result<Vec<ResidueType>, TopologyError> {
    let mut invalid = Vec::new();
    let mut seen_invalid = BTreeSet::new();
    let mut residue_types = Vec::with_capacity(sequence.len());

    for symbol in sequence.chars() {
        match ResidueType::from_symbol(symbol, kind) {
            Some(residue_type) => residue_types.push(residue_type),
            None => {
                if seen_invalid.insert(symbol) {
                    invalid.push(symbol);
                }
            }
        }
    }

    if invalid.is_empty() {
        Ok(residue_types)
    } else {
        Err(TopologyError::InvalidSequence {
            chain_id: chain_id.to_string(),
            kind,
            symbols: invalid,
        })
    }
}

/// Builds a topology holding a single chain, or appends it to `existing`.
pub fn create_chain_topology(
    chain_id: &str,
    kind: ChainKind,
    sequence: &str,
    regions: &GlobularRegions,
    existing: Option<Topology>,
) -> Result<Topology, TopologyError> {
    let mut builder = TopologyBuilder::from_topology(existing.unwrap_or_default());
    builder.add_chain(chain_id, kind, sequence, regions)?;
    Ok(builder.build())
}
