use std::path::{Path, PathBuf};

use crate::errors::{IoResultExt, Result};

/// Directory an external program runs in.
///
/// The context is handed to each call explicitly and applied to the child
/// only; the working directory of this process is never changed, so nothing
/// has to be restored when a call fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    working_dir: PathBuf,
}

impl ExecutionContext {
    /// Context for calls that run inside `dir`
    pub fn enter(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: dir.into(),
        }
    }

    /// Context for the directory this process was started in
    pub fn current() -> Result<Self> {
        let dir = std::env::current_dir().with_path("failed to read current directory", ".")?;
        Ok(Self::enter(dir))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
