//! Native build system invocations.
//!
//! Each supported project kind has one configure and one build command.
//! CMake projects export `compile_commands.json` for the analyzer; QMake
//! projects are built under `pvs-studio-analyzer trace` instead.

use std::io::Write;

use crate::config::Config;
use crate::errors::{PvsError, Result};
use crate::process::{ExecutionContext, Invocation, ProcessRunner};
use crate::project::{Project, ProjectKind};
use crate::workspace::Workspace;

/// Build steps for one supported project kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDriver {
    CMake,
    QMake,
}

impl BuildDriver {
    pub fn for_kind(kind: ProjectKind) -> Option<Self> {
        match kind {
            ProjectKind::CMake => Some(Self::CMake),
            ProjectKind::QMake => Some(Self::QMake),
            ProjectKind::Unknown => None,
        }
    }

    pub fn for_project(project: &Project) -> Result<Self> {
        Self::for_kind(project.kind()).ok_or_else(|| PvsError::UnknownProjectType {
            dir: project.root().to_path_buf(),
        })
    }

    pub fn configure_invocation(&self, workspace: &Workspace, config: &Config) -> Invocation {
        match self {
            Self::CMake => Invocation::new("Cmake", &config.tools.cmake)
                .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=On")
                .arg(format!("-B{}", workspace.build_dir.display()))
                .path_arg(&workspace.project_dir),
            Self::QMake => Invocation::new("Qmake", &config.tools.qmake)
                .arg("CONFIG+=debug")
                .path_arg(&workspace.project_dir),
        }
    }

    pub fn build_invocation(&self, workspace: &Workspace, config: &Config) -> Invocation {
        let jobs = config.build_threads.to_string();
        match self {
            Self::CMake => Invocation::new("Build", &config.tools.make)
                .arg(format!("-C{}", workspace.build_dir.display()))
                .args(["-j".to_string(), jobs]),
            Self::QMake => Invocation::new("Build", &config.tools.analyzer)
                .args(["trace", "--"])
                .arg(&config.tools.make)
                .args(["-j".to_string(), jobs]),
        }
    }

    pub fn configure<W: Write>(
        &self,
        runner: &mut ProcessRunner<W>,
        workspace: &Workspace,
        config: &Config,
        ctx: &ExecutionContext,
        verbose: bool,
    ) -> Result<()> {
        runner.run(&self.configure_invocation(workspace, config), ctx, verbose)
    }

    pub fn build<W: Write>(
        &self,
        runner: &mut ProcessRunner<W>,
        workspace: &Workspace,
        config: &Config,
        ctx: &ExecutionContext,
        verbose: bool,
    ) -> Result<()> {
        runner.run(&self.build_invocation(workspace, config), ctx, verbose)
    }
}
