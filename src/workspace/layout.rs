use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::project::Project;

/// Directory inside the build dir holding analyzer intermediates
pub const DATA_DIR_NAME: &str = ".PVS-Studio";
pub const TEMP_CONFIG_NAME: &str = "pvscheck.cfg";
pub const TEMP_RULES_NAME: &str = ".pvsconfig";
pub const LOG_NAME: &str = "PVS.log";
pub const TASKS_NAME: &str = "PVS.tasks";

/// Hex characters of the path digest kept in the directory name
const HASH_WIDTH: usize = 32;

/// Paths used by one check run of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    pub data_dir: PathBuf,
    pub temp_config_file: PathBuf,
    pub temp_rules_file: PathBuf,
    pub log_file: PathBuf,
    pub tasks_file: PathBuf,
    /// Filtered report copied into the project root
    pub output_file: PathBuf,
}

/// Derives workspaces under a temp root
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    temp_root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(temp_root: impl Into<PathBuf>) -> Self {
        Self {
            temp_root: temp_root.into(),
        }
    }

    /// Layout rooted at the system temp directory
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    /// Compute every workspace path for `project`. Performs no I/O.
    pub fn derive(&self, project: &Project) -> Workspace {
        let project_dir = project.root().to_path_buf();
        let build_dir = self.temp_root.join(build_dir_name(&project_dir));
        let data_dir = build_dir.join(DATA_DIR_NAME);

        Workspace {
            temp_config_file: data_dir.join(TEMP_CONFIG_NAME),
            temp_rules_file: data_dir.join(TEMP_RULES_NAME),
            log_file: data_dir.join(LOG_NAME),
            tasks_file: data_dir.join(TASKS_NAME),
            output_file: project_dir.join(TASKS_NAME),
            project_dir,
            build_dir,
            data_dir,
        }
    }
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self::system()
    }
}

/// `pvs-<parent>-<leaf>_[<digest>]`
///
/// The names keep the directory recognizable in the temp dir; the digest of
/// the full path keeps `/a/x/src` and `/b/x/src` apart.
pub fn build_dir_name(project_dir: &Path) -> String {
    let leaf = file_name_of(Some(project_dir));
    let parent = file_name_of(project_dir.parent());
    format!("pvs-{}-{}_[{}]", parent, leaf, path_digest(project_dir))
}

fn file_name_of(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn path_digest(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(HASH_WIDTH);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;

    #[test]
    fn test_build_dir_name_shape() {
        let name = build_dir_name(Path::new("/home/dev/viewer"));
        assert!(name.starts_with("pvs-dev-viewer_["));
        assert!(name.ends_with(']'));
        assert_eq!(name.len(), "pvs-dev-viewer_[]".len() + HASH_WIDTH);
    }

    #[test]
    fn test_build_dir_name_at_filesystem_root() {
        let name = build_dir_name(Path::new("/"));
        assert!(name.starts_with("pvs--_["));
    }

    #[test]
    fn test_derived_paths() {
        let layout = WorkspaceLayout::new("/tmp");
        let ws = layout.derive(&Project::new("/src/app", ProjectKind::CMake));

        assert!(ws.build_dir.starts_with("/tmp"));
        assert_eq!(ws.data_dir, ws.build_dir.join(".PVS-Studio"));
        assert_eq!(ws.temp_config_file, ws.data_dir.join("pvscheck.cfg"));
        assert_eq!(ws.temp_rules_file, ws.data_dir.join(".pvsconfig"));
        assert_eq!(ws.log_file, ws.data_dir.join("PVS.log"));
        assert_eq!(ws.tasks_file, ws.data_dir.join("PVS.tasks"));
        assert_eq!(ws.output_file, PathBuf::from("/src/app/PVS.tasks"));
    }
}
