//! # Core Module
//!
//! Stateless building blocks of the coarse-grained model: bead and chain
//! models, initial coordinate generation, and the force-field physics.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Residue catalogue, beads, chains, topologies
//! - **Initial Coordinates** ([`coords`]) - Spiral layouts and structure reduction
//! - **Force Field** ([`forcefield`]) - Parameter tables, potentials, bonded terms and system assembly

pub mod coords;
pub mod forcefield;
pub mod models;
