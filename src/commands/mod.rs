//! Command implementations behind the `pvscheck` subcommands.
//!
//! - **check**: probe the license, then build, analyze and summarize
//! - **info**: show where the project and its workspace live
//! - **report**: summarize the last check again
//! - **init**: write the default `.pvscheck.yml`
//! - **version**: show tool and analyzer versions
//!
//! Every project command starts from a [`Session`].

pub mod check;
pub mod info;
pub mod init;
pub mod report;
pub mod session;
pub mod version;

pub use check::run_check;
pub use info::{show_info, write_info};
pub use init::{init_config, write_default_config};
pub use report::run_report;
pub use session::Session;
pub use version::show_version;
