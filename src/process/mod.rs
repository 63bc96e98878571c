//! External program execution.
//!
//! Every tool the pipeline drives is described by an [`Invocation`] and run
//! through a [`ProcessRunner`] inside an explicit [`ExecutionContext`].

mod command_line;
mod context;
mod progress;
mod runner;

pub use command_line::{quote_arg, Invocation};
pub use context::ExecutionContext;
pub use progress::{parse_percent, ProgressRenderer};
pub use runner::ProcessRunner;
