use std::path::{Component, Path, PathBuf};

use super::{Project, ProjectKind};
use crate::config::directory_ancestors;
use crate::errors::{IoResultExt, PvsError, Result};

/// How [`locate`] treats the start directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateMode {
    /// The start directory itself must be a project
    Exact,
    /// Any ancestor may be the project; the outermost match wins
    SearchUpward,
}

/// Probe `dir` only, returning the first kind whose marker is present
pub fn classify(dir: &Path) -> Option<ProjectKind> {
    ProjectKind::DETECTION_ORDER
        .into_iter()
        .find(|kind| kind.matches(dir))
}

/// Find the project for `start`.
///
/// In [`LocateMode::SearchUpward`] every ancestor up to the filesystem root is
/// classified and the match closest to the root is returned, so a
/// subdirectory with its own `CMakeLists.txt` resolves to the enclosing
/// top-level project.
pub fn locate(start: &Path, mode: LocateMode) -> Result<Project> {
    let start = absolute(start)?;

    match mode {
        LocateMode::Exact => match classify(&start) {
            Some(kind) => Ok(Project::new(start, kind)),
            None => Err(PvsError::UnknownProjectType { dir: start }),
        },
        LocateMode::SearchUpward => {
            let outermost = directory_ancestors(start.clone())
                .filter_map(|dir| classify(&dir).map(|kind| Project::new(dir, kind)))
                .last();

            match outermost {
                Some(project) => {
                    log::debug!(
                        "Located {} project at {}",
                        project.kind(),
                        project.root().display()
                    );
                    Ok(project)
                }
                None => Err(PvsError::ProjectNotFound { start }),
            }
        }
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically, so one
/// directory always yields the same project root
fn absolute(path: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(path).with_path("failed to resolve directory", path)?;
    Ok(clean_path(&path))
}

fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
