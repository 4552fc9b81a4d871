//! Command-line interface definition.
//!
//! Defines the CLI structure with clap v4 derive macros. Global flags
//! control verbosity and color; the subcommand defaults to `build` so the
//! bare `lattice` invocation needs no arguments at all.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lattice - a matrix build orchestrator for JavaScript libraries
#[derive(Parser, Debug)]
#[command(
    name = "lattice",
    version,
    about = "Build a library into its full artifact matrix",
    long_about = "Lattice compiles a library source tree into a deterministic matrix of\n\
                  distributable artifacts: the main entry and every discovered sub-module,\n\
                  each as CJS, ESM and IIFE bundles, minified and unminified, followed by\n\
                  a second independent minification pass."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute; defaults to `build`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the full artifact matrix
    Build(BuildArgs),
    /// Validate configuration and source layout without building
    Check(CheckArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Build(BuildArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Path to the configuration file (default: lattice.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Library source root
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Output directory for emitted artifacts
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Brand string used for IIFE global symbols
    #[arg(long)]
    pub display_name: Option<String>,

    /// Language-level compatibility target (e.g. es2018)
    #[arg(long)]
    pub target: Option<String>,

    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Upper bound on concurrently running bundler invocations
    #[arg(long)]
    pub max_parallel: Option<usize>,

    /// Bundler binary to invoke
    #[arg(long)]
    pub bundler_bin: Option<PathBuf>,

    /// Minifier binary to invoke for the post pass
    #[arg(long)]
    pub minifier_bin: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Path to the configuration file (default: lattice.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
