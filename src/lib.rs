//! Check C and C++ projects with the PVS-Studio static analyzer.
//!
//! The crate locates a CMake or QMake project, builds it in a workspace under
//! the system temp directory, runs the analyzer and its report converter, and
//! writes a filtered task list back into the project.

pub mod builder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod license;
pub mod pipeline;
pub mod process;
pub mod project;
pub mod report;
pub mod workspace;

pub use crate::builder::BuildDriver;
pub use crate::config::{load_config, Config, ConfigSource, Levels, LoadedConfig, ToolPaths};
pub use crate::errors::{PvsError, Result};
pub use crate::license::LicenseStatus;
pub use crate::pipeline::{AnalysisPipeline, CheckOptions, Stage};
pub use crate::process::{ExecutionContext, Invocation, ProcessRunner};
pub use crate::project::{locate, LocateMode, Project, ProjectKind};
pub use crate::report::{summarize, ReportInfo};
pub use crate::workspace::{Workspace, WorkspaceLayout};
