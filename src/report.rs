//! Filtering and counting of the converted diagnostics.
//!
//! The converter's task list has one diagnostic per line with tab-separated
//! fields, the severity being one of `err`, `warn` or `note`. Summarizing
//! drops blank lines, the documentation banner and known false positives,
//! writes the rest to the output file and counts severities.

use colored::Colorize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{IoResultExt, PvsError, Result};

/// Banner line the converter adds to every report
pub const DOCUMENTATION_BANNER: &str = "Help: The documentation for all analyzer";

/// Diagnostics dropped from every report.
///
/// V1042 flags files under a copyleft license and fires on every source file
/// of some projects.
pub const KNOWN_FALSE_POSITIVES: &[&str] = &["V1042"];

const ERROR_MARKER: &str = "\terr\t";
const WARNING_MARKER: &str = "\twarn\t";
const NOTE_MARKER: &str = "\tnote\t";

/// Counts collected while summarizing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInfo {
    pub output_file: PathBuf,
    pub errors: usize,
    pub warnings: usize,
    pub notes: usize,
}

impl ReportInfo {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.notes
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "**************************")?;
        writeln!(out, "* The {} file was created", self.output_file.display())?;
        writeln!(out, "*")?;
        writeln!(out, "* Errors:   {}", count(self.errors, |s| s.red().bold()))?;
        writeln!(out, "* Warnings: {}", count(self.warnings, |s| s.yellow()))?;
        writeln!(out, "* Notes:    {}", count(self.notes, |s| s.normal()))?;
        Ok(())
    }

    pub fn print(&self) -> io::Result<()> {
        self.render(&mut io::stdout().lock())
    }
}

fn count(n: usize, style: impl Fn(&str) -> colored::ColoredString) -> colored::ColoredString {
    let text = n.to_string();
    if n == 0 {
        text.normal()
    } else {
        style(&text)
    }
}

/// Whether a trimmed line belongs in the report
fn keep_line(line: &str) -> bool {
    !line.is_empty()
        && !line.contains(DOCUMENTATION_BANNER)
        && !KNOWN_FALSE_POSITIVES.iter().any(|id| line.contains(id))
}

/// Filter `input` into `output`, counting severities.
///
/// Markers are matched anywhere in the line, so a line carrying more than one
/// is counted once per marker. Counts are returned with `output_file` unset.
pub fn summarize_lines<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<ReportInfo> {
    let mut info = ReportInfo::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();
        if !keep_line(line) {
            continue;
        }

        if line.contains(ERROR_MARKER) {
            info.errors += 1;
        }
        if line.contains(WARNING_MARKER) {
            info.warnings += 1;
        }
        if line.contains(NOTE_MARKER) {
            info.notes += 1;
        }

        output.write_all(line.as_bytes())?;
        output.write_all(b"\n")?;
    }

    Ok(info)
}

/// Filter the tasks file at `input` into `output`.
///
/// The result is written next to `output` first and moved into place, so
/// `input` and `output` may name the same file.
pub fn summarize(input: &Path, output: &Path) -> Result<ReportInfo> {
    let reader = File::open(input)
        .map(BufReader::new)
        .with_path("failed to open tasks file", input)?;

    let partial = partial_path(output);
    let mut writer = File::create(&partial)
        .map(BufWriter::new)
        .with_path("failed to create report file", &partial)?;

    let written = summarize_lines(reader, &mut writer).and_then(|info| writer.flush().map(|_| info));
    drop(writer);

    let mut info = match written {
        Ok(info) => info,
        Err(e) => {
            discard_partial(&partial);
            return Err(PvsError::io("failed to filter report", input, e));
        }
    };
    if let Err(e) = fs::rename(&partial, output) {
        discard_partial(&partial);
        return Err(PvsError::io("failed to write report file", output, e));
    }

    log::debug!(
        "Report {}: {} diagnostics ({} errors, {} warnings, {} notes)",
        output.display(),
        info.total(),
        info.errors,
        info.warnings,
        info.notes
    );
    info.output_file = output.to_path_buf();
    Ok(info)
}

fn discard_partial(partial: &Path) {
    if let Err(e) = fs::remove_file(partial) {
        log::warn!("Could not remove {}: {}", partial.display(), e);
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    output.with_file_name(name)
}
