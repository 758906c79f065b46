//! # Mpipi Core Library
//!
//! Builds coarse-grained force-field descriptions of protein and RNA systems
//! in the Mpipi-Recharged model: one bead per residue, harmonic backbone
//! bonds, elastic networks for folded domains, and tabulated Wang–Frenkel
//! and screened-Coulomb nonbonded terms.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless models (`Topology`, `Bead`), coordinate
//!   generation, and the pure physics of the force field.
//!
//! - **[`engine`]: Configuration and Plumbing.** Model constants, build configuration,
//!   the aggregated `EngineError`, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Composes chains and produces a complete
//!   `ParticleSystem` ready for a dynamics engine.

pub mod core;
pub mod engine;
pub mod workflows;
