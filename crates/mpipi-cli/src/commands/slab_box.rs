use crate::cli::SlabBoxArgs;
use crate::config::SystemFile;
use crate::error::{CliError, Result};
use mpipi::engine::error::EngineError;
use mpipi::workflows::slab::{SlabComponent, check_box_extent, target_box_vectors};
use tracing::info;

/// Box vectors and the largest chain radius of gyration for a slab.
#[derive(Debug, Clone, PartialEq)]
pub struct SlabBox {
    pub box_vectors: [[f64; 3]; 3],
    pub largest_rg: f64,
}

/// Sizes a slab box from the chains of `file`.
///
/// Masses come from the chain topologies and radii of gyration from the
/// initial coordinates.
pub fn compute(file: &SystemFile, long_side_scale: f64, density: f64) -> Result<SlabBox> {
    let spacing = file.constants.unwrap_or_default().spiral_spacing();
    let mut components = Vec::with_capacity(file.chains.len());
    let mut largest_rg: f64 = 0.0;

    for entry in &file.chains {
        let placed = entry.to_placed()?;
        let chain = placed.spec.build(&spacing).map_err(EngineError::from)?;
        let mass = chain
            .topology
            .chain_mass(placed.spec.id())
            .ok_or_else(|| CliError::Config(format!("Chain '{}' was not built", entry.id)))?;
        let rg = chain.radius_of_gyration();
        info!(chain = %entry.id, mass, rg, copies = entry.copies, "Slab component.");
        largest_rg = largest_rg.max(rg);
        components.push(SlabComponent {
            mass,
            copies: entry.copies,
        });
    }

    let box_vectors = target_box_vectors(&components, long_side_scale, density)?;
    Ok(SlabBox {
        box_vectors,
        largest_rg,
    })
}

pub fn run(args: SlabBoxArgs) -> Result<()> {
    let file = SystemFile::from_file(&args.config)?;
    let slab = compute(&file, args.long_side_scale, args.density)?;

    let [x, y, z] = slab.box_vectors;
    println!("Box vectors (nm):");
    for v in [x, y, z] {
        println!("  [{:10.4}, {:10.4}, {:10.4}]", v[0], v[1], v[2]);
    }
    if !check_box_extent(&slab.box_vectors, slab.largest_rg) {
        println!(
            "Warning: short side {:.2} nm is small compared to the largest radius of gyration ({:.2} nm).",
            y[1], slab.largest_rg
        );
    }
    Ok(())
}
