//! Out-of-tree working directory for a project.
//!
//! [`WorkspaceLayout::derive`] is a pure function of the project root;
//! [`materialize`] creates the directories and temporary analyzer files.
//! A workspace is reused between runs unless a clean run is requested, which
//! lets the analyzer work incrementally.

mod layout;
mod prepare;

pub use layout::{build_dir_name, Workspace, WorkspaceLayout, DATA_DIR_NAME};
pub use prepare::{
    discover_rule_files, materialize, materialize_with_user_dir, PreparedWorkspace,
};
