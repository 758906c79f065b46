//! # Workflows Module
//!
//! Top-level entry points: compose chains into one system, build its
//! particle-system description, and size slab boxes.
//!
//! - **Build Workflow** ([`build`]) - Chain composition and the one-call system builder
//! - **Slab Sizing** ([`slab`]) - Target box vectors from mass and density

pub mod build;
pub mod slab;
