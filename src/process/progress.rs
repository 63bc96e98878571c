//! Single-line progress feedback for quiet tool runs.
//!
//! Each stdout line of the child is fed to a [`ProgressRenderer`]. Lines of
//! the form `[ 45%] ...` switch the display to a percentage for the rest of
//! the run; until then every non-blank line advances a spinner. The line is
//! redrawn in place with a carriage return. All lines are kept so they can be
//! replayed if the tool fails.

use std::io::{self, Write};

const SPINNER_MARKS: [char; 4] = ['|', '/', '-', '\\'];

/// Percentage from a `[<n>%]` prefixed line
pub fn parse_percent(line: &str) -> Option<u32> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find("%]")?;
    rest[..end].trim().parse().ok()
}

pub struct ProgressRenderer<W: Write> {
    caption: String,
    out: W,
    show_spinner: bool,
    mark: usize,
    lines: Vec<String>,
}

impl<W: Write> ProgressRenderer<W> {
    pub fn new(caption: impl Into<String>, out: W) -> Self {
        Self {
            caption: caption.into(),
            out,
            show_spinner: true,
            mark: 0,
            lines: Vec::new(),
        }
    }

    /// Record one output line and redraw the indicator
    pub fn feed(&mut self, line: String) -> io::Result<()> {
        if !line.is_empty() {
            if let Some(percent) = parse_percent(&line) {
                self.show_spinner = false;
                write!(self.out, "{}   {}%\r", self.caption, percent)?;
                self.out.flush()?;
            } else if self.show_spinner {
                self.mark = (self.mark + 1) % SPINNER_MARKS.len();
                write!(self.out, "{}   {}\r", self.caption, SPINNER_MARKS[self.mark])?;
                self.out.flush()?;
            }
        }
        self.lines.push(line);
        Ok(())
    }

    /// Every line seen so far, blank ones included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print every captured line, in order
    pub fn replay(&mut self) -> io::Result<()> {
        for line in &self.lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(lines: &[&str]) -> String {
        let mut renderer = ProgressRenderer::new("Build", Vec::new());
        for line in lines {
            renderer.feed(line.to_string()).unwrap();
        }
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("[ 45%] Building CXX object main.o"), Some(45));
        assert_eq!(parse_percent("[100%] Built target app"), Some(100));
        assert_eq!(parse_percent("[  0%]"), Some(0));
        assert_eq!(parse_percent(" [ 45%] indented"), None);
        assert_eq!(parse_percent("[abc%] text"), None);
        assert_eq!(parse_percent("[ 45 ] no percent"), None);
        assert_eq!(parse_percent("plain line"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn test_spinner_rotates() {
        let out = render(&["a", "b", "c", "d", "e"]);
        assert_eq!(
            out,
            "Build   /\rBuild   -\rBuild   \\\rBuild   |\rBuild   /\r"
        );
    }

    #[test]
    fn test_blank_lines_render_nothing() {
        assert_eq!(render(&["", ""]), "");
    }

    #[test]
    fn test_percent_stops_spinner_for_good() {
        let out = render(&["configuring", "[ 10%] a.o", "linking", "[ 50%] b.o"]);
        assert_eq!(out, "Build   /\rBuild   10%\rBuild   50%\r");
    }

    #[test]
    fn test_all_lines_kept_for_replay() {
        let mut renderer = ProgressRenderer::new("Build", Vec::new());
        for line in ["a", "", "[ 1%] x"] {
            renderer.feed(line.to_string()).unwrap();
        }
        assert_eq!(renderer.lines(), ["a", "", "[ 1%] x"]);

        let mut replayed = ProgressRenderer::new("Build", Vec::new());
        replayed.feed("a".into()).unwrap();
        replayed.feed("b".into()).unwrap();
        replayed.replay().unwrap();
        let out = String::from_utf8(replayed.into_inner()).unwrap();
        assert!(out.ends_with("a\nb\n"));
    }
}
