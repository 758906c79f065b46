use super::residue::ResidueType;
use serde::Serialize;

/// Whether a bead belongs to a folded (elastic-network) domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralClass {
    #[default]
    Flexible,
    Rigid,
}

impl StructuralClass {
    #[inline]
    pub fn is_rigid(self) -> bool {
        matches!(self, StructuralClass::Rigid)
    }
}

/// One coarse-grained particle. Immutable once placed in a topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bead {
    pub residue_type: ResidueType,
    pub class: StructuralClass,
    /// Position of the owning chain within the topology.
    pub chain_index: usize,
    /// Zero-based index within the owning chain.
    pub local_index: usize,
    /// Index within the whole topology; aligned with position arrays.
    pub global_index: usize,
}

impl Bead {
    #[inline]
    pub fn mass(&self) -> f64 {
        self.residue_type.mass()
    }

    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.class.is_rigid()
    }

    pub fn name(&self) -> String {
        self.residue_type.particle_name()
    }
}
