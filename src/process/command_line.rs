use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// One external program call: what to run and what to show while it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Label shown next to the progress indicator
    pub caption: String,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(caption: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn args_os(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsStr::new)
    }

    /// The command line as a shell user would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Quote arguments containing whitespace; show empty ones as `""`
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        "\"\"".to_string()
    } else if arg.contains([' ', '\t', '\n']) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}
