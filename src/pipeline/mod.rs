//! The check pipeline.
//!
//! A run moves through [`Stage`]s in a fixed order:
//!
//! ```text
//! Located -> Prepared -> Configured -> Built -> Analyzed -> Converted
//!         -> Filtered -> Reported -> Done
//! ```
//!
//! Preparing and reporting are local work; every other step is one external
//! program started inside the workspace build directory. The first failing
//! step stops the run and its error is returned unchanged. Nothing is retried;
//! a later run without `--force` reuses whatever the workspace kept.

mod stage;

pub use stage::Stage;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::builder::BuildDriver;
use crate::config::{user_config_dir, Config};
use crate::errors::Result;
use crate::process::{ExecutionContext, Invocation, ProcessRunner};
use crate::project::Project;
use crate::report::{summarize, ReportInfo};
use crate::workspace::{materialize_with_user_dir, PreparedWorkspace, Workspace};

/// Switches for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Remove the workspace before starting
    pub clean: bool,
    /// Stream tool output instead of showing progress
    pub verbose: bool,
}

/// `pvs-studio-analyzer analyze`
pub fn analyze_invocation(
    workspace: &Workspace,
    config: &Config,
    prepared: &PreparedWorkspace,
) -> Invocation {
    let mut inv = Invocation::new("Analyzing", &config.tools.analyzer)
        .arg("analyze")
        .args(["-j".to_string(), config.pvs_threads.to_string()])
        .arg("--cfg")
        .path_arg(&workspace.temp_config_file);

    if prepared.reused {
        inv = inv.arg("--incremental");
    }
    if let Some(rules) = &prepared.rules_file {
        inv = inv.arg("-R").path_arg(rules);
    }

    inv.arg("-o").path_arg(&workspace.log_file)
}

/// `plog-converter` producing the task list. `-r .` is the build directory.
pub fn convert_invocation(workspace: &Workspace, config: &Config) -> Invocation {
    Invocation::new("Report", &config.tools.converter)
        .arg("-a")
        .arg(config.levels_expression())
        .arg("-s")
        .path_arg(&workspace.temp_config_file)
        .args(["-r", ".", "-t", "tasklist", "-o"])
        .path_arg(&workspace.tasks_file)
        .path_arg(&workspace.log_file)
}

/// `pvs-studio-analyzer filter-suppressed`
pub fn filter_invocation(workspace: &Workspace, config: &Config) -> Invocation {
    Invocation::new("Filter suppressed messages", &config.tools.analyzer)
        .arg("filter-suppressed")
        .path_arg(&workspace.log_file)
}

/// Drives one project through every stage
pub struct AnalysisPipeline<W: Write> {
    project: Project,
    workspace: Workspace,
    config: Config,
    options: CheckOptions,
    driver: BuildDriver,
    runner: ProcessRunner<W>,
    user_config_dir: Option<PathBuf>,
    stage: Stage,
    prepared: Option<PreparedWorkspace>,
    report: Option<ReportInfo>,
}

impl AnalysisPipeline<io::Stdout> {
    pub fn new(
        project: Project,
        workspace: Workspace,
        config: Config,
        options: CheckOptions,
    ) -> Result<Self> {
        Self::with_runner(project, workspace, config, options, ProcessRunner::stdout())
    }
}

impl<W: Write> AnalysisPipeline<W> {
    /// Fails for projects of unknown kind
    pub fn with_runner(
        project: Project,
        workspace: Workspace,
        config: Config,
        options: CheckOptions,
        runner: ProcessRunner<W>,
    ) -> Result<Self> {
        let driver = BuildDriver::for_project(&project)?;
        Ok(Self {
            project,
            workspace,
            config,
            options,
            driver,
            runner,
            user_config_dir: user_config_dir(),
            stage: Stage::Located,
            prepared: None,
            report: None,
        })
    }

    /// Directory searched for the per-user rules file
    pub fn with_user_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_config_dir = dir;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn runner(&self) -> &ProcessRunner<W> {
        &self.runner
    }

    /// Perform the transition out of the current stage.
    ///
    /// On error the stage stays where it was.
    pub fn step(&mut self) -> Result<Stage> {
        if self.stage.next_is_external() {
            log::info!("{}: {}", self.stage, self.stage.next_action());
        } else {
            log::debug!("{}: {}", self.stage, self.stage.next_action());
        }

        match self.stage {
            Stage::Located => {
                let prepared = materialize_with_user_dir(
                    &self.workspace,
                    &self.config,
                    self.options.clean,
                    self.user_config_dir.as_deref(),
                )?;
                self.prepared = Some(prepared);
            }
            Stage::Prepared => {
                let ctx = self.build_dir_context();
                self.driver.configure(
                    &mut self.runner,
                    &self.workspace,
                    &self.config,
                    &ctx,
                    self.options.verbose,
                )?;
            }
            Stage::Configured => {
                let ctx = self.build_dir_context();
                self.driver.build(
                    &mut self.runner,
                    &self.workspace,
                    &self.config,
                    &ctx,
                    self.options.verbose,
                )?;
            }
            Stage::Built => {
                let inv = match &self.prepared {
                    Some(prepared) => analyze_invocation(&self.workspace, &self.config, prepared),
                    None => unreachable!("the workspace is prepared before the build stage"),
                };
                self.run_in_build_dir(&inv)?;
            }
            Stage::Analyzed => {
                let inv = convert_invocation(&self.workspace, &self.config);
                self.run_in_build_dir(&inv)?;
            }
            Stage::Converted => {
                let inv = filter_invocation(&self.workspace, &self.config);
                self.run_in_build_dir(&inv)?;
            }
            Stage::Filtered => {
                let info = summarize(&self.workspace.tasks_file, &self.workspace.output_file)?;
                self.report = Some(info);
            }
            Stage::Reported | Stage::Done => {}
        }

        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
        Ok(self.stage)
    }

    /// Run every remaining stage and return the report
    pub fn run(mut self) -> Result<ReportInfo> {
        while self.stage != Stage::Done {
            if let Err(e) = self.step() {
                log::debug!("Pipeline stopped at {}: {}", self.stage, e);
                return Err(e);
            }
        }
        Ok(self.report.unwrap_or_default())
    }

    fn build_dir_context(&self) -> ExecutionContext {
        ExecutionContext::enter(&self.workspace.build_dir)
    }

    fn run_in_build_dir(&mut self, inv: &Invocation) -> Result<()> {
        let ctx = self.build_dir_context();
        self.runner.run(inv, &ctx, self.options.verbose)
    }
}
