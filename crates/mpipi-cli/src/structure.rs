use crate::error::{CliError, Result};
use mpipi::core::models::structure::{AtomisticStructure, StructureAtom, StructureResidue};
use nalgebra::Point3;
use pdbtbx::{Format, PDBError, ReadOptions, StrictnessLevel};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

const ANGSTROM_PER_NM: f64 = 10.0;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid PDB data: {0}")]
    Invalid(String),
    #[error("No residues found in the first model")]
    Empty,
}

fn join_errors(errors: &[PDBError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reads the residues of the first model of a PDB stream.
///
/// Coordinates are converted to nanometres. If `chain` is given, only the
/// residues of that chain are kept.
pub fn parse_pdb<T: Read>(
    reader: BufReader<T>,
    chain: Option<char>,
) -> std::result::Result<AtomisticStructure, PdbError> {
    let (pdb, warnings) = ReadOptions::new()
        .set_format(Format::Pdb)
        .set_level(StrictnessLevel::Loose)
        .read_raw(reader)
        .map_err(|errors| PdbError::Invalid(join_errors(&errors)))?;
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "PDB reader reported: {}", join_errors(&warnings));
    }

    let model = pdb.model(0).ok_or(PdbError::Empty)?;
    if pdb.model_count() > 1 {
        warn!(models = pdb.model_count(), "Using only the first model");
    }

    let residues: Vec<StructureResidue> = model
        .chains()
        .filter(|c| chain.is_none_or(|wanted| c.id().chars().next() == Some(wanted)))
        .flat_map(|c| c.residues())
        .map(|residue| StructureResidue {
            name: residue.name().unwrap_or_default().to_string(),
            atoms: residue
                .atoms()
                .map(|atom| {
                    let (x, y, z) = atom.pos();
                    StructureAtom {
                        name: atom.name().to_string(),
                        position: Point3::new(x, y, z) / ANGSTROM_PER_NM,
                    }
                })
                .collect(),
        })
        .collect();

    if residues.is_empty() {
        return Err(PdbError::Empty);
    }
    Ok(AtomisticStructure::new(residues))
}

pub fn read_pdb(path: &Path, chain: Option<char>) -> Result<AtomisticStructure> {
    debug!("Reading structure from {:?}", path);
    let file = File::open(path)?;
    let structure = parse_pdb(BufReader::new(file), chain).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    debug!(residues = structure.residues.len(), "Structure loaded.");
    Ok(structure)
}
