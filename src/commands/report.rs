use anyhow::{Context, Result};

use super::session::Session;
use crate::cli::GlobalArgs;
use crate::report::summarize;

/// `pvscheck report`: summarize the tasks file of the last check again
pub fn run_report(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global)?;
    let ws = &session.workspace;

    let info = summarize(&ws.tasks_file, &ws.output_file)
        .with_context(|| format!("no report for {}, run a check first", session.project_dir().display()))?;
    info.print().context("failed to print report")?;
    Ok(())
}
