//! Lattice CLI library.
//!
//! Exposed as a library so integration tests can exercise command
//! implementations directly; the `lattice` binary in `main.rs` is a thin
//! wrapper over these modules.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
