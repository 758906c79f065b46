use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    Protein,
    #[serde(rename = "rna")]
    Rna,
}

impl ChainKind {
    /// Prefix used in particle names (`p` for protein, `r` for RNA).
    pub fn particle_prefix(self) -> char {
        match self {
            ChainKind::Protein => 'p',
            ChainKind::Rna => 'r',
        }
    }

    /// The symbols accepted in sequences of this kind.
    pub fn alphabet(self) -> &'static str {
        match self {
            ChainKind::Protein => "ACDEFGHIKLMNPQRSTVWY",
            ChainKind::Rna => "U",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChainKind::Protein => "Protein",
                ChainKind::Rna => "RNA",
            }
        )
    }
}

/// An ordered run of beads sharing a chain id.
///
/// The chain owns no beads itself; it records the contiguous slice of the
/// topology's global bead indices that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub id: String,
    pub kind: ChainKind,
    pub(crate) beads: Range<usize>,
}

impl Chain {
    pub(crate) fn new(id: &str, kind: ChainKind, first_bead: usize) -> Self {
        Self {
            id: id.to_string(),
            kind,
            beads: first_bead..first_bead,
        }
    }

    /// Global indices of the beads of this chain, in residue order.
    pub fn bead_range(&self) -> Range<usize> {
        self.beads.clone()
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    /// Converts a chain-local index to the global bead index.
    pub fn global_index(&self, local_index: usize) -> Option<usize> {
        (local_index < self.len()).then(|| self.beads.start + local_index)
    }
}
