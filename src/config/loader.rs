use std::fs;
use std::path::{Path, PathBuf};

use super::core::Config;
use crate::errors::{IoResultExt, PvsError, Result};

/// File name looked up in the project root and its ancestors
pub const DEFAULT_CONFIG_FILE: &str = ".pvscheck.yml";

/// File name of the per-user configuration
pub const USER_CONFIG_FILE: &str = "pvscheck.yml";

/// Per-user PVS-Studio directory, `~/.config/PVS-Studio`
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("PVS-Studio"))
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`
    Explicit(PathBuf),
    /// Found next to the project or in the user directory
    Discovered(PathBuf),
    /// Nothing found, built-in defaults
    Default,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Discovered(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "<built-in defaults>"),
        }
    }
}

/// A validated configuration together with its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Pure function to generate a directory and all of its ancestors
pub fn directory_ancestors(start: PathBuf) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
}

/// Parse and validate configuration text
pub fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let config = if contents.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str::<Config>(contents)
            .map_err(|e| PvsError::config_in(format!("failed to parse: {}", e), path))?
    };

    config.validate().map_err(|e| match e {
        PvsError::Config { message, .. } => PvsError::config_in(message, path),
        other => other,
    })?;

    Ok(config)
}

/// Read, parse and validate one configuration file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).with_path("failed to read config file", path)?;
    parse_config(&contents, path)
}

/// Candidate configuration files, closest to the project first.
///
/// `user_dir` is the per-user directory searched after the project ancestors.
pub fn find_config_files(project_dir: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = directory_ancestors(project_dir.to_path_buf())
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.is_file())
        .collect();

    if let Some(file) = user_dir.map(|dir| dir.join(USER_CONFIG_FILE)) {
        if file.is_file() {
            found.push(file);
        }
    }

    found
}

/// Resolve the configuration for a project.
///
/// An explicit path must exist. Otherwise the closest discovered file is
/// used, falling back to [`Config::default`].
pub fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_user_dir(project_dir, explicit, user_config_dir().as_deref())
}

pub fn load_config_with_user_dir(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    match find_config_files(project_dir, user_dir).into_iter().next() {
        Some(path) => {
            let config = load_config_file(&path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok(LoadedConfig {
                config,
                source: ConfigSource::Discovered(path),
            })
        }
        None => {
            log::debug!("No config file found, using built-in defaults");
            Ok(LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Default,
            })
        }
    }
}
