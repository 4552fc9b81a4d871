//! Lattice CLI - matrix build orchestrator for JavaScript library artifacts.
//!
//! Handles command-line argument parsing, logging initialization and command
//! dispatch. With no subcommand, `lattice` runs a build.

use clap::Parser;
use lattice_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let result = match args.command.unwrap_or_default() {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args).await,
    };

    result.map_err(error::to_report)
}
