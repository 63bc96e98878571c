use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;
use crate::config::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_YML};

/// `pvscheck init`: write the default configuration to `--config` or
/// `.pvscheck.yml` in the current directory
pub fn init_config(global: &GlobalArgs) -> Result<()> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    write_default_config(&path, global.force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(path, DEFAULT_CONFIG_YML)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads_as_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);

        write_default_config(&path, false).unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config, crate::config::Config::default());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "PvsThreads: 1\n").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "PvsThreads: 1\n");

        write_default_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_YML);
    }
}
