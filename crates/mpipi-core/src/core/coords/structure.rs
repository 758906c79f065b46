use super::CoordinateError;
use super::spiral::recenter;
use crate::core::models::structure::AtomisticStructure;
use nalgebra::Point3;

/// Name of the atom each residue is reduced to.
pub const REFERENCE_ATOM: &str = "CA";

/// Reduces an atomistic structure to one bead position per standard residue.
///
/// The sequence implied by the structure is compared with `declared_sequence`
/// before any coordinate is produced. Positions are centred on the origin.
pub fn structure_coordinates(
    chain_id: &str,
    declared_sequence: &str,
    structure: &AtomisticStructure,
) -> Result<Vec<Point3<f64>>, CoordinateError> {
    let found = structure.sequence();
    if found != declared_sequence {
        return Err(CoordinateError::SequenceMismatch {
            chain_id: chain_id.to_string(),
            declared: declared_sequence.to_string(),
            found,
        });
    }

    let points = structure
        .standard_residues()
        .enumerate()
        .map(|(index, (residue, _))| {
            residue
                .atom(REFERENCE_ATOM)
                .map(|atom| atom.position)
                .ok_or_else(|| CoordinateError::MissingReferenceAtom {
                    chain_id: chain_id.to_string(),
                    residue_index: index,
                    residue_name: residue.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(recenter(points))
}
