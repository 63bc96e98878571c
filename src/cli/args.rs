use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Checks C and C++ projects with the PVS-Studio analyzer
#[derive(Parser, Debug)]
#[command(name = "pvscheck", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Action to perform (default: check)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options accepted before or after the subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Show the commands being run and their raw output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Rebuild the project from scratch / overwrite an existing config
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Use an alternate configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "PVSCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory; without it the current directory and its parents are searched
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Skip the license probe before checking
    #[arg(long, global = true)]
    pub no_license_check: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Build and analyze the project
    Check,
    /// Write a default configuration file
    Init,
    /// Summarize the results of a previous check again
    Report,
    /// Show the project and workspace paths
    Info,
    /// Show versions of pvscheck and the analyzer, and the license status
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["pvscheck", "-f"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(cli.global.force);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pvscheck", "info", "-v", "-C", "/src/app"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Info));
        assert!(cli.global.verbose);
        assert_eq!(cli.global.directory, Some(PathBuf::from("/src/app")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["pvscheck", "--bogus"]).is_err());
    }
}
