use anyhow::{anyhow, Context, Result};

use super::session::Session;
use crate::cli::GlobalArgs;
use crate::errors::PvsError;
use crate::license::{self, default_license_file, LicenseStatus};
use crate::pipeline::{AnalysisPipeline, CheckOptions};
use crate::process::{ExecutionContext, ProcessRunner};

/// `pvscheck check`: license probe, then every pipeline stage
pub fn run_check(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global)?;
    let config = session.loaded.config.clone();

    if global.no_license_check {
        log::info!("License check skipped");
    } else if check_license(&config.tools.cli)? == LicenseStatus::Expired {
        return Err(PvsError::LicenseExpired.into());
    }

    if global.verbose {
        println!("Build directory: {}", session.workspace.build_dir.display());
    }

    let options = CheckOptions {
        clean: global.force,
        verbose: global.verbose,
    };
    let pipeline = AnalysisPipeline::new(session.project, session.workspace, config, options)?;
    let report = pipeline.run()?;

    report.print().context("failed to print report")?;
    Ok(())
}

/// Probe the per-user license file with the analyzer CLI
pub(crate) fn check_license(cli: &str) -> Result<LicenseStatus> {
    let license_file =
        default_license_file().ok_or_else(|| anyhow!("cannot determine the home directory"))?;
    let ctx = ExecutionContext::current()?;
    let status = license::probe(&mut ProcessRunner::stdout(), cli, &license_file, &ctx)?;
    Ok(status)
}
