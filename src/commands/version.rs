use anyhow::Result;

use super::check::check_license;
use crate::cli::GlobalArgs;
use crate::config::load_config;
use crate::process::{ExecutionContext, Invocation, ProcessRunner};

/// `pvscheck version`: our version, the analyzer's, and the license state
pub fn show_version(global: &GlobalArgs) -> Result<()> {
    println!("pvscheck   {}", env!("CARGO_PKG_VERSION"));

    let ctx = ExecutionContext::current()?;
    let config = load_config(ctx.working_dir(), global.config.as_deref())?.config;
    let cli = &config.tools.cli;

    let version = ProcessRunner::stdout().capture(&Invocation::new("Version", cli).arg("--version"), &ctx)?;
    print!("{}", version);
    if !version.ends_with('\n') {
        println!();
    }

    if check_license(cli)?.is_valid() {
        println!("License is valid");
    } else {
        println!("License is expired!");
    }
    Ok(())
}
