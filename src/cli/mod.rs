//! CLI module for pvscheck
//!
//! This module provides the command-line interface, including:
//! - Argument parsing (`args`)
//! - Runtime setup and error reporting (`setup`)
//!
//! The command implementations live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, GlobalArgs};
pub use setup::{exit_code_for, find_pvs_error, init_logging, report_error};

use crate::commands;

/// Dispatch to the selected command; no subcommand means `check`
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let global = &cli.global;
    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => commands::run_check(global),
        Commands::Init => commands::init_config(global),
        Commands::Report => commands::run_report(global),
        Commands::Info => commands::show_info(global),
        Commands::Version => commands::show_version(global),
    }
}
