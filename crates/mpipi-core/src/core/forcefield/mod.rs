//! # Force Field Module
//!
//! Physics of the Mpipi-Recharged model and the assembly of a complete
//! particle system from a topology and its coordinates.
//!
//! ## Architecture
//!
//! - **Parameter Tables** ([`params`]) - The static 21×21 short-range and electrostatic lookup tables
//! - **Screening** ([`screening`]) - Debye length from temperature and ionic strength
//! - **Potentials** ([`potentials`]) - Wang–Frenkel and screened-Coulomb pair energies
//! - **Bonded Terms** ([`bonded`]) - Backbone bonds and elastic networks for rigid domains
//! - **System Assembly** ([`system`]) - Masses, bonds, nonbonded terms, exclusions and box

pub mod bonded;
pub mod params;
pub mod potentials;
pub mod screening;
pub mod system;
