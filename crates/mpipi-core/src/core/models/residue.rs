use super::chain::ChainKind;
use phf::{Map, phf_map};
use std::fmt;

/// Number of bead types known to the Mpipi-Recharged parameter tables.
pub const RESIDUE_TYPE_COUNT: usize = 21;

/// One coarse-grained bead type: the 20 amino acids plus uridine.
///
/// The discriminant order is the row/column order of the nonbonded parameter
/// tables and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ResidueType {
    Methionine,
    Glycine,
    Lysine,
    Threonine,
    Arginine,
    Alanine,
    AsparticAcid,
    GlutamicAcid,
    Tyrosine,
    Valine,
    Leucine,
    Glutamine,
    Tryptophan,
    Phenylalanine,
    Serine,
    Histidine,
    Asparagine,
    Proline,
    Cysteine,
    Isoleucine,
    Uridine,
}

static THREE_LETTER_CODES: Map<&'static str, ResidueType> = phf_map! {
    "MET" => ResidueType::Methionine,
    "GLY" => ResidueType::Glycine,
    "LYS" => ResidueType::Lysine,
    "THR" => ResidueType::Threonine,
    "ARG" => ResidueType::Arginine,
    "ALA" => ResidueType::Alanine,
    "ASP" => ResidueType::AsparticAcid,
    "GLU" => ResidueType::GlutamicAcid,
    "TYR" => ResidueType::Tyrosine,
    "VAL" => ResidueType::Valine,
    "LEU" => ResidueType::Leucine,
    "GLN" => ResidueType::Glutamine,
    "TRP" => ResidueType::Tryptophan,
    "PHE" => ResidueType::Phenylalanine,
    "SER" => ResidueType::Serine,
    "HIS" => ResidueType::Histidine,
    "ASN" => ResidueType::Asparagine,
    "PRO" => ResidueType::Proline,
    "CYS" => ResidueType::Cysteine,
    "ILE" => ResidueType::Isoleucine,
};

impl ResidueType {
    pub const ALL: [ResidueType; RESIDUE_TYPE_COUNT] = [
        ResidueType::Methionine,
        ResidueType::Glycine,
        ResidueType::Lysine,
        ResidueType::Threonine,
        ResidueType::Arginine,
        ResidueType::Alanine,
        ResidueType::AsparticAcid,
        ResidueType::GlutamicAcid,
        ResidueType::Tyrosine,
        ResidueType::Valine,
        ResidueType::Leucine,
        ResidueType::Glutamine,
        ResidueType::Tryptophan,
        ResidueType::Phenylalanine,
        ResidueType::Serine,
        ResidueType::Histidine,
        ResidueType::Asparagine,
        ResidueType::Proline,
        ResidueType::Cysteine,
        ResidueType::Isoleucine,
        ResidueType::Uridine,
    ];

    /// Row/column index of this type in the nonbonded parameter tables.
    #[inline]
    pub fn table_index(self) -> usize {
        self as usize
    }

    /// Bead mass in daltons.
    pub fn mass(self) -> f64 {
        match self {
            ResidueType::Methionine => 131.20,
            ResidueType::Glycine => 57.05,
            ResidueType::Lysine => 128.20,
            ResidueType::Threonine => 101.10,
            ResidueType::Arginine => 156.20,
            ResidueType::Alanine => 71.08,
            ResidueType::AsparticAcid => 115.10,
            ResidueType::GlutamicAcid => 129.10,
            ResidueType::Tyrosine => 163.20,
            ResidueType::Valine => 99.07,
            ResidueType::Leucine => 113.20,
            ResidueType::Glutamine => 128.10,
            ResidueType::Tryptophan => 186.20,
            ResidueType::Phenylalanine => 147.20,
            ResidueType::Serine => 87.08,
            ResidueType::Histidine => 137.10,
            ResidueType::Asparagine => 114.10,
            ResidueType::Proline => 97.12,
            ResidueType::Cysteine => 103.10,
            ResidueType::Isoleucine => 113.20,
            ResidueType::Uridine => 244.20,
        }
    }

    pub fn one_letter_code(self) -> char {
        match self {
            ResidueType::Methionine => 'M',
            ResidueType::Glycine => 'G',
            ResidueType::Lysine => 'K',
            ResidueType::Threonine => 'T',
            ResidueType::Arginine => 'R',
            ResidueType::Alanine => 'A',
            ResidueType::AsparticAcid => 'D',
            ResidueType::GlutamicAcid => 'E',
            ResidueType::Tyrosine => 'Y',
            ResidueType::Valine => 'V',
            ResidueType::Leucine => 'L',
            ResidueType::Glutamine => 'Q',
            ResidueType::Tryptophan => 'W',
            ResidueType::Phenylalanine => 'F',
            ResidueType::Serine => 'S',
            ResidueType::Histidine => 'H',
            ResidueType::Asparagine => 'N',
            ResidueType::Proline => 'P',
            ResidueType::Cysteine => 'C',
            ResidueType::Isoleucine => 'I',
            ResidueType::Uridine => 'U',
        }
    }

    /// The chain kind this bead type may appear in.
    pub fn chain_kind(self) -> ChainKind {
        match self {
            ResidueType::Uridine => ChainKind::Rna,
            _ => ChainKind::Protein,
        }
    }

    /// Parses a one-letter symbol within the alphabet of `kind`.
    ///
    /// Protein chains accept the 20 standard amino-acid letters. RNA chains
    /// currently accept only `U`, the single nucleotide with parameters.
    pub fn from_symbol(symbol: char, kind: ChainKind) -> Option<Self> {
        let residue_type = Self::ALL
            .iter()
            .copied()
            .find(|t| t.one_letter_code() == symbol)?;
        (residue_type.chain_kind() == kind).then_some(residue_type)
    }

    /// Looks up an amino acid by its three-letter PDB residue name.
    pub fn from_three_letter(name: &str) -> Option<Self> {
        THREE_LETTER_CODES.get(name.trim()).copied()
    }

    /// Particle name as written into topologies, e.g. `pK` or `rU`.
    pub fn particle_name(self) -> String {
        format!("{}{}", self.chain_kind().particle_prefix(), self.one_letter_code())
    }
}

impl fmt::Display for ResidueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.particle_name())
    }
}
