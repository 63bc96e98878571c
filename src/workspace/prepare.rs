//! Creating the workspace on disk.
//!
//! Materializing writes two files the analyzer reads:
//!
//! - the temporary analyzer config (`key=value` per line)
//! - the temporary rules file, the concatenation of every `.pvsconfig` found
//!   from the filesystem root down to the project plus the per-user one,
//!   followed by the configured `Checks`
//!
//! Rules found closer to the project come later in the file, so project-local
//! rules override global ones.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::layout::{Workspace, TEMP_RULES_NAME};
use crate::config::{directory_ancestors, user_config_dir, Config};
use crate::errors::{IoResultExt, PvsError, Result};

/// Paths always excluded from analysis
const SYSTEM_EXCLUDES: [&str; 2] = ["/opt", "/usr"];

/// State of the workspace after materializing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedWorkspace {
    /// The build dir survived from an earlier run
    pub reused: bool,
    /// Set when a rules file was written and referenced from the config
    pub rules_file: Option<PathBuf>,
}

/// Create the workspace directories and temporary analyzer files.
///
/// With `clean` the whole build dir is removed first.
pub fn materialize(workspace: &Workspace, config: &Config, clean: bool) -> Result<PreparedWorkspace> {
    materialize_with_user_dir(workspace, config, clean, user_config_dir().as_deref())
}

pub fn materialize_with_user_dir(
    workspace: &Workspace,
    config: &Config,
    clean: bool,
    user_dir: Option<&Path>,
) -> Result<PreparedWorkspace> {
    if clean {
        remove_dir_if_exists(&workspace.build_dir)?;
    }
    let reused = workspace.build_dir.is_dir();

    fs::create_dir_all(&workspace.build_dir)
        .with_path("failed to create build directory", &workspace.build_dir)?;
    fs::create_dir_all(&workspace.data_dir)
        .with_path("failed to create data directory", &workspace.data_dir)?;

    let rule_files = discover_rule_files(&workspace.project_dir, user_dir);
    let rules_file = write_rules_file(workspace, &rule_files, &config.checks)?;

    let contents = temp_config_contents(workspace, config, rules_file.as_deref())?;
    fs::write(&workspace.temp_config_file, contents)
        .with_path("failed to write analyzer config", &workspace.temp_config_file)?;

    log::debug!(
        "Workspace {} ready (reused: {}, rules: {})",
        workspace.build_dir.display(),
        reused,
        rule_files.len()
    );

    Ok(PreparedWorkspace { reused, rules_file })
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PvsError::io("failed to remove build directory", dir, e)),
    }
}

/// `.pvsconfig` files ordered from the most global to the most local.
///
/// The per-user file comes first, then the filesystem root, down to the
/// project root itself.
pub fn discover_rule_files(project_dir: &Path, user_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = directory_ancestors(project_dir.to_path_buf())
        .map(|dir| dir.join(TEMP_RULES_NAME))
        .filter(|path| path.is_file())
        .collect();

    if let Some(file) = user_dir.map(|dir| dir.join(TEMP_RULES_NAME)) {
        if file.is_file() && !found.contains(&file) {
            found.push(file);
        }
    }

    found.reverse();
    found
}

/// Returns the written file, or `None` when there was nothing to write
fn write_rules_file(
    workspace: &Workspace,
    rule_files: &[PathBuf],
    checks: &[String],
) -> Result<Option<PathBuf>> {
    let target = &workspace.temp_rules_file;

    if rule_files.is_empty() && checks.is_empty() {
        // A stale file from an earlier run must not be picked up by -R
        match fs::remove_file(target) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(PvsError::io("failed to remove rules file", target, e)),
        }
        return Ok(None);
    }

    let mut out = String::new();
    for file in rule_files {
        let data = fs::read_to_string(file).with_path("failed to read rules file", file)?;
        out.push_str(&data);
        out.push('\n');
    }
    for check in checks {
        out.push_str("//-");
        out.push_str(check);
        out.push('\n');
    }

    fs::write(target, out).with_path("failed to write rules file", target)?;
    Ok(Some(target.clone()))
}

fn temp_config_contents(
    workspace: &Workspace,
    config: &Config,
    rules_file: Option<&Path>,
) -> Result<String> {
    // On macOS the temp dir lives behind the /var -> /private/var symlink and
    // the analyzer reports the resolved form.
    let canonical_build_dir = fs::canonicalize(&workspace.build_dir)
        .with_path("failed to resolve build directory", &workspace.build_dir)?;

    let mut lines = vec![
        format!("analysis-mode={}", config.analysis_mode()),
        format!("sourcetree-root={}", workspace.project_dir.display()),
        format!("exclude-path={}", workspace.build_dir.display()),
        format!("exclude-path={}", canonical_build_dir.display()),
    ];
    lines.extend(SYSTEM_EXCLUDES.iter().map(|p| format!("exclude-path={}", p)));

    if let Some(rules) = rules_file {
        lines.push(format!("rules-config={}", rules.display()));
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    Ok(contents)
}
