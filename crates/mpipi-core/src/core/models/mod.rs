//! # Core Models Module
//!
//! Data structures describing a coarse-grained system: one bead per residue,
//! beads grouped into chains, chains collected into a topology.
//!
//! ## Key Components
//!
//! - [`residue`] - The fixed catalogue of 21 bead types, their masses and table indices
//! - [`chain`] - Chain kinds (protein, RNA) and contiguous bead ranges
//! - [`bead`] - Individual beads and their structural class
//! - [`regions`] - Rigid (globular) domains per chain
//! - [`topology`] - The multi-chain topology with its sealed bond list
//! - [`builder`] - Validated construction of chains from one-letter sequences
//! - [`structure`] - Minimal in-memory atomistic structures for coordinate reduction
//!
//! ## Usage
//!
//! ```ignore
//! use mpipi::core::models::builder::TopologyBuilder;
//! use mpipi::core::models::chain::ChainKind;
//! use mpipi::core::models::regions::GlobularRegions;
//!
//! let mut builder = TopologyBuilder::new();
//! builder.add_chain("A", ChainKind::Protein, "MKVLA", &GlobularRegions::default())?;
//! let topology = builder.build();
//! ```

pub mod bead;
pub mod builder;
pub mod chain;
pub mod regions;
pub mod residue;
pub mod structure;
pub mod topology;
