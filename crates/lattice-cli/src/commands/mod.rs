//! Command implementations for the Lattice CLI.
//!
//! - [`build`] - run the full artifact matrix build
//! - [`check`] - validate configuration and source layout without building

pub mod build;
pub mod check;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
