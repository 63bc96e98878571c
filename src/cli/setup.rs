//! Setup and teardown for the command-line process
//!
//! Logging initialisation and the mapping from errors to exit codes live
//! here so `main` stays a thin shell.

use colored::Colorize;

use crate::errors::{PvsError, EXIT_COMMAND_ERROR};

/// Initialise `env_logger`. `RUST_LOG` always wins over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);

    // A second initialisation (tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// First [`PvsError`] in the chain, if the failure came from the library
pub fn find_pvs_error(err: &anyhow::Error) -> Option<&PvsError> {
    err.chain().find_map(|cause| cause.downcast_ref::<PvsError>())
}

/// Exit code for a failed command
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    find_pvs_error(err)
        .map(PvsError::exit_code)
        .unwrap_or(EXIT_COMMAND_ERROR)
}

/// Print a failed command as `Error: <message>` on stderr
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{EXIT_EXEC_NOT_FOUND, EXIT_LICENSE_EXPIRED};
    use anyhow::Context;

    #[test]
    fn test_exit_code_through_context() {
        let err: anyhow::Result<()> = Err(PvsError::ExecutableNotFound {
            program: "qmake".into(),
        })
        .context("configure failed");
        assert_eq!(exit_code_for(&err.unwrap_err()), EXIT_EXEC_NOT_FOUND);
    }

    #[test]
    fn test_exit_code_license() {
        let err = anyhow::Error::new(PvsError::LicenseExpired);
        assert_eq!(exit_code_for(&err), EXIT_LICENSE_EXPIRED);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), EXIT_COMMAND_ERROR);
    }
}
