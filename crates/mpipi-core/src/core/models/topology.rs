use super::bead::Bead;
use super::chain::{Chain, ChainKind};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Invalid sequence for {kind} chain '{chain_id}': symbols {symbols:?} are not in the alphabet '{alphabet}'", alphabet = kind.alphabet())]
    InvalidSequence {
        chain_id: String,
        kind: ChainKind,
        symbols: Vec<char>,
    },
    #[error("Chain '{0}' already exists in the topology")]
    DuplicateChain(String),
    #[error("Rigid-region index {index} is out of bounds for chain '{chain_id}' of length {length}")]
    RegionOutOfBounds {
        chain_id: String,
        index: usize,
        length: usize,
    },
    #[error("Bond ({0}, {1}) references a bead outside the topology")]
    BondOutOfRange(usize, usize),
    #[error("Bead {0} cannot be bonded to itself")]
    SelfBond(usize),
    #[error("Topology bonds are sealed; clone the topology to register a different bond set")]
    Sealed,
}

/// An undirected pair of global bead indices, stored with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self { i: a, j: b } } else { Self { i: b, j: a } }
    }
}

/// Chains of beads plus an explicit bond list.
///
/// Global bead indices are assigned in insertion order and never change.
/// Once a bond set has been registered the topology is sealed: further
/// registrations are refused so repeated builds cannot accumulate bonds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub(crate) chains: Vec<Chain>,
    pub(crate) beads: Vec<Bead>,
    bonds: Vec<Bond>,
    sealed: bool,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn beads(&self) -> &[Bead] {
        &self.beads
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn find_chain(&self, chain_id: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == chain_id)
    }

    /// Beads of the given chain, in residue order.
    pub fn chain_beads(&self, chain: &Chain) -> &[Bead] {
        &self.beads[chain.bead_range()]
    }

    /// Total mass of one chain in daltons.
    pub fn chain_mass(&self, chain_id: &str) -> Option<f64> {
        let chain = self.find_chain(chain_id)?;
        Some(self.chain_beads(chain).iter().map(Bead::mass).sum())
    }

    pub(crate) fn push_chain(&mut self, chain: Chain, beads: Vec<Bead>) {
        self.beads.extend(beads);
        self.chains.push(chain);
    }

    /// Registers an explicit bond set and seals the topology.
    ///
    /// Duplicate pairs in `bonds` are collapsed. Fails without modifying the
    /// topology if it is already sealed or a pair is invalid.
    pub fn register_bonds(&mut self, bonds: impl IntoIterator<Item = Bond>) -> Result<(), TopologyError> {
        if self.sealed {
            return Err(TopologyError::Sealed);
        }
        let count = self.beads.len();
        let mut seen: HashSet<Bond> = self.bonds.iter().copied().collect();
        let mut accepted = Vec::new();
        for bond in bonds {
            if bond.i == bond.j {
                return Err(TopologyError::SelfBond(bond.i));
            }
            if bond.j >= count {
                return Err(TopologyError::BondOutOfRange(bond.i, bond.j));
            }
            if seen.insert(bond) {
                accepted.push(bond);
            }
        }
        self.bonds.extend(accepted);
        self.sealed = true;
        Ok(())
    }

    /// Appends all chains of `other`, re-basing its bead indices and bonds.
    pub fn append(&mut self, other: &Topology) -> Result<(), TopologyError> {
        if let Some(dup) = other.chains.iter().find(|c| self.find_chain(&c.id).is_some()) {
            return Err(TopologyError::DuplicateChain(dup.id.clone()));
        }
        let bead_offset = self.beads.len();
        let chain_offset = self.chains.len();
        for chain in &other.chains {
            let mut chain = chain.clone();
            chain.beads = chain.beads.start + bead_offset..chain.beads.end + bead_offset;
            self.chains.push(chain);
        }
        self.beads.extend(other.beads.iter().map(|b| Bead {
            chain_index: b.chain_index + chain_offset,
            global_index: b.global_index + bead_offset,
            ..b.clone()
        }));
        self.bonds.extend(
            other
                .bonds
                .iter()
                .map(|b| Bond::new(b.i + bead_offset, b.j + bead_offset)),
        );
        self.sealed |= other.sealed;
        Ok(())
    }
}
