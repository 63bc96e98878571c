//! Project kinds and discovery.
//!
//! A project is a directory carrying a build descriptor the tool knows how to
//! drive. The set of kinds is closed: adding one means adding a variant to
//! [`ProjectKind`] together with its marker check and its build commands in
//! [`crate::builder`].

mod locator;

pub use locator::{classify, locate, LocateMode};

use std::fmt;
use std::path::{Path, PathBuf};

/// Build systems recognized in a project root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    Unknown,
    CMake,
    QMake,
}

impl ProjectKind {
    /// Known kinds in detection priority order
    pub const DETECTION_ORDER: [ProjectKind; 2] = [Self::CMake, Self::QMake];

    /// Whether `dir` carries this kind's marker
    pub fn matches(self, dir: &Path) -> bool {
        match self {
            Self::Unknown => false,
            Self::CMake => dir.join("CMakeLists.txt").exists(),
            Self::QMake => has_qmake_project_file(dir),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::CMake => "CMake",
            Self::QMake => "QMake",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `*.pro` directly inside `dir`
fn has_qmake_project_file(dir: &Path) -> bool {
    let Some(dir) = dir.to_str() else {
        return false;
    };
    let pattern = format!("{}/*.pro", glob::Pattern::escape(dir));

    match glob::glob(&pattern) {
        Ok(mut paths) => paths.any(|entry| entry.is_ok()),
        Err(e) => {
            log::warn!("Invalid project glob {}: {}", pattern, e);
            false
        }
    }
}

/// A discovered project root. Immutable once located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    kind: ProjectKind,
}

impl Project {
    /// Create a project without probing the filesystem.
    ///
    /// Callers other than the locator are responsible for the marker
    /// actually being present.
    pub fn new(root: impl Into<PathBuf>, kind: ProjectKind) -> Self {
        Self {
            root: root.into(),
            kind,
        }
    }

    /// Absolute path of the project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }
}
