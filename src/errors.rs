//! Error types shared by the whole check pipeline.
//!
//! Every fallible library operation returns [`PvsError`]. The categories map
//! one-to-one onto the ways a run can fail:
//!
//! - discovery: [`PvsError::ProjectNotFound`], [`PvsError::UnknownProjectType`]
//! - filesystem: [`PvsError::Io`]
//! - external tools: [`PvsError::ProcessFailed`], [`PvsError::ExecutableNotFound`]
//! - configuration: [`PvsError::Config`]
//! - licensing: [`PvsError::LicenseExpired`]
//!
//! The binary turns the category into a process exit code via
//! [`PvsError::exit_code`].

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Process exit code for a command line that could not be parsed.
pub const EXIT_ARGS_PARSE_ERROR: i32 = 1;
/// Process exit code for any other failed command.
pub const EXIT_COMMAND_ERROR: i32 = 2;
/// Process exit code when a required external program is not installed.
pub const EXIT_EXEC_NOT_FOUND: i32 = 3;
/// Process exit code when the analyzer license has expired.
pub const EXIT_LICENSE_EXPIRED: i32 = 4;

/// Main error type for pvscheck operations
#[derive(Debug, Error)]
pub enum PvsError {
    /// No ancestor of the start directory is a recognized project
    #[error("the project directory was not found or has an unknown type (searched from {})", start.display())]
    ProjectNotFound { start: PathBuf },

    /// The given directory carries no known build descriptor
    #[error("{} directory has an unknown project type", dir.display())]
    UnknownProjectType { dir: PathBuf },

    /// File system related errors
    #[error("{message}{}", path.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran and reported failure
    #[error("{program} failed ({status})")]
    ProcessFailed { program: String, status: ExitStatus },

    /// An external tool could not be started because it is not installed
    #[error("{program} command not found, it looks like the program is not installed")]
    ExecutableNotFound { program: String },

    /// Malformed or invalid configuration
    #[error("configuration error: {message}{}", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// The license probe reported an expired license
    #[error("your license is expired")]
    LicenseExpired,
}

impl PvsError {
    /// Create an I/O error carrying the path it happened on
    pub fn io(message: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Create a configuration error without file context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error for a specific file
    pub fn config_in(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Exit code the binary should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ExecutableNotFound { .. } => EXIT_EXEC_NOT_FOUND,
            Self::LicenseExpired => EXIT_LICENSE_EXPIRED,
            _ => EXIT_COMMAND_ERROR,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, PvsError>;

/// Extension trait attaching a path and message to raw I/O results
pub trait IoResultExt<T> {
    fn with_path(self, message: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, message: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| PvsError::io(message, path, e))
    }
}
