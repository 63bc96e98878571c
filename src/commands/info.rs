use anyhow::Result;
use std::io::{self, Write};

use super::session::Session;
use crate::cli::GlobalArgs;

/// `pvscheck info`: where the project, its config and its workspace are
pub fn show_info(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global)?;
    write_info(&session, global.verbose, &mut io::stdout().lock())?;
    Ok(())
}

pub fn write_info<W: Write>(session: &Session, verbose: bool, out: &mut W) -> io::Result<()> {
    let ws = &session.workspace;

    writeln!(out, "  Project directory: {}", session.project_dir().display())?;
    writeln!(out, "  Project type:      {}", session.project.kind())?;
    writeln!(out, "  Output file:       {}", ws.output_file.display())?;
    writeln!(out, "  Config file:       {}", session.loaded.source)?;
    writeln!(out)?;
    writeln!(out, "  Build directory:   {}", ws.build_dir.display())?;

    if verbose {
        writeln!(out, "  Data directory:    {}", ws.data_dir.display())?;
        writeln!(out, "  Temp config:       {}", ws.temp_config_file.display())?;
        writeln!(out, "  Temp rules:        {}", ws.temp_rules_file.display())?;
        writeln!(out, "  Log file:          {}", ws.log_file.display())?;
        writeln!(out, "  Tasks file:        {}", ws.tasks_file.display())?;
    }
    Ok(())
}
