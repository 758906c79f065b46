use crate::cli::DebyeArgs;
use crate::error::Result;
use mpipi::core::forcefield::screening::{debye_length, relative_permittivity};
use mpipi::engine::error::EngineError;
use tracing::info;

pub fn run(args: DebyeArgs) -> Result<()> {
    let length = debye_length(args.temperature, args.ionic_strength).map_err(EngineError::from)?;
    info!(
        temperature = args.temperature,
        ionic_strength = args.ionic_strength,
        length,
        "Computed Debye length."
    );
    println!(
        "T = {} K, I = {} mM, εr = {:.4}",
        args.temperature,
        args.ionic_strength,
        relative_permittivity(args.temperature)
    );
    println!("Debye length: {length:.6} nm (κ = {:.6} nm⁻¹)", 1.0 / length);
    Ok(())
}
