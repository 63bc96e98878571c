use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use super::command_line::Invocation;
use super::context::ExecutionContext;
use super::progress::ProgressRenderer;
use crate::errors::{IoResultExt, PvsError, Result};

/// Runs external tools, showing either their raw output or a progress line.
///
/// `out` receives everything the runner itself prints: the echoed command
/// line, the progress indicator and the replay of a failed run.
pub struct ProcessRunner<W: Write> {
    out: W,
}

impl ProcessRunner<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProcessRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run `invocation` to completion inside `ctx`.
    ///
    /// Verbose runs echo the command line and connect the child to this
    /// process's stdout and stderr. Quiet runs capture stdout for the
    /// progress indicator and print it in full only if the tool fails.
    /// Blocks until the child exits; there is no timeout.
    pub fn run(&mut self, invocation: &Invocation, ctx: &ExecutionContext, verbose: bool) -> Result<()> {
        log::debug!(
            "Running in {}: {}",
            ctx.working_dir().display(),
            invocation.command_line()
        );

        if verbose {
            writeln!(self.out, "{}", invocation.command_line())
                .and_then(|_| self.out.flush())
                .with_path("failed to write output", ctx.working_dir())?;

            let status = spawn(invocation, ctx, Stdio::inherit())?
                .wait()
                .with_path("failed to wait for process", ctx.working_dir())?;
            return check_status(invocation, status);
        }

        let mut child = spawn(invocation, ctx, Stdio::piped())?;
        let mut renderer = ProgressRenderer::new(&invocation.caption, &mut self.out);

        let streamed = match child.stdout.take() {
            Some(stdout) => stream_lines(stdout, &mut renderer),
            None => Ok(()),
        };
        let status = child
            .wait()
            .with_path("failed to wait for process", ctx.working_dir())?;
        streamed.with_path("failed to read process output", ctx.working_dir())?;

        if !status.success() {
            renderer
                .replay()
                .with_path("failed to write output", ctx.working_dir())?;
        }
        check_status(invocation, status)
    }

    /// Run `invocation` and return its stdout. Stderr passes through.
    pub fn capture(&mut self, invocation: &Invocation, ctx: &ExecutionContext) -> Result<String> {
        let child = spawn(invocation, ctx, Stdio::piped())?;
        let output = child
            .wait_with_output()
            .with_path("failed to wait for process", ctx.working_dir())?;
        check_status(invocation, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn stream_lines<R: io::Read, W: Write>(
    reader: R,
    renderer: &mut ProgressRenderer<W>,
) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        renderer.feed(String::from_utf8_lossy(&buf).into_owned())?;
    }
}

/// Locate the program on `PATH` before spawning so a missing install is
/// reported as such rather than as a generic I/O failure.
fn resolve_program(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| PvsError::ExecutableNotFound {
        program: program.to_string(),
    })
}

fn spawn(invocation: &Invocation, ctx: &ExecutionContext, stdout: Stdio) -> Result<Child> {
    let program = resolve_program(&invocation.program)?;

    Command::new(&program)
        .args(invocation.args_os())
        .current_dir(ctx.working_dir())
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PvsError::ExecutableNotFound {
                program: invocation.program.clone(),
            },
            _ => PvsError::io("failed to start process", &program, e),
        })
}

fn check_status(invocation: &Invocation, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(PvsError::ProcessFailed {
            program: invocation.program.clone(),
            status,
        })
    }
}
