//! Project, configuration and workspace resolved for one command

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::GlobalArgs;
use crate::config::{load_config, LoadedConfig};
use crate::project::{locate, LocateMode, Project};
use crate::workspace::{Workspace, WorkspaceLayout};

/// Everything a project command needs before it touches the workspace
#[derive(Debug, Clone)]
pub struct Session {
    pub project: Project,
    pub loaded: LoadedConfig,
    pub workspace: Workspace,
}

impl Session {
    /// Locate the project named by `--directory`, or search upward from the
    /// current directory, then load its configuration.
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        Self::open_with_layout(global, &WorkspaceLayout::system())
    }

    pub fn open_with_layout(global: &GlobalArgs, layout: &WorkspaceLayout) -> Result<Self> {
        let project = match &global.directory {
            Some(dir) => locate(dir, LocateMode::Exact)?,
            None => {
                let cwd = std::env::current_dir().context("failed to read current directory")?;
                locate(&cwd, LocateMode::SearchUpward)?
            }
        };

        let loaded = load_config(project.root(), global.config.as_deref())?;
        log::info!("Using configuration: {}", loaded.source);

        let workspace = layout.derive(&project);
        Ok(Self {
            project,
            loaded,
            workspace,
        })
    }

    pub fn project_dir(&self) -> &Path {
        self.project.root()
    }
}
