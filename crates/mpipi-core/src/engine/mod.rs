//! # Engine Module
//!
//! Build configuration, error aggregation and progress reporting shared by
//! the workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Model constants, solution conditions and their builder
//! - **Error Handling** ([`error`]) - [`error::EngineError`], wrapping every lower-level error
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod config;
pub mod error;
pub mod progress;
