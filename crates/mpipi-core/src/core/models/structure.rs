use super::residue::ResidueType;
use nalgebra::Point3;

/// One atom of an atomistic residue, positioned in nanometres.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    pub name: String,
    pub position: Point3<f64>,
}

/// One residue of an atomistic structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureResidue {
    /// Three-letter residue name, e.g. `LYS`.
    pub name: String,
    pub atoms: Vec<StructureAtom>,
}

impl StructureResidue {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
        }
    }

    pub fn with_atom(mut self, name: &str, position: Point3<f64>) -> Self {
        self.atoms.push(StructureAtom {
            name: name.to_string(),
            position,
        });
        self
    }

    pub fn atom(&self, name: &str) -> Option<&StructureAtom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    pub fn residue_type(&self) -> Option<ResidueType> {
        ResidueType::from_three_letter(&self.name)
    }
}

/// An atomistic chain in residue order.
///
/// Residues that are not standard amino acids (waters, ligands, ions) may be
/// present; coordinate reduction skips them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomisticStructure {
    pub residues: Vec<StructureResidue>,
}

impl AtomisticStructure {
    pub fn new(residues: Vec<StructureResidue>) -> Self {
        Self { residues }
    }

    /// Residues with a recognised amino-acid name, in order.
    pub fn standard_residues(&self) -> impl Iterator<Item = (&StructureResidue, ResidueType)> {
        self.residues
            .iter()
            .filter_map(|r| r.residue_type().map(|t| (r, t)))
    }

    /// One-letter sequence implied by the standard residues.
    pub fn sequence(&self) -> String {
        self.standard_residues()
            .map(|(_, t)| t.one_letter_code())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_skips_non_standard_residues() {
        let structure = AtomisticStructure::new(vec![
            StructureResidue::new("MET").with_atom("CA", Point3::origin()),
            StructureResidue::new("HOH").with_atom("O", Point3::origin()),
            StructureResidue::new("LYS").with_atom("CA", Point3::origin()),
        ]);
        assert_eq!(structure.sequence(), "MK");
        assert_eq!(structure.standard_residues().count(), 2);
    }

    #[test]
    fn atom_lookup_is_by_exact_name() {
        let residue = StructureResidue::new("GLY")
            .with_atom("N", Point3::new(0.0, 0.0, 0.0))
            .with_atom("CA", Point3::new(0.1, 0.0, 0.0));
        assert_eq!(residue.atom("CA").unwrap().position.x, 0.1);
        assert!(residue.atom("CB").is_none());
    }
}
