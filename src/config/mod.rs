//! Configuration value object and its loading.
//!
//! The pipeline only ever sees a resolved [`Config`]; where it came from is
//! recorded in [`ConfigSource`] for the `info` command.

mod core;
mod levels;
mod loader;

pub use self::core::{Config, Levels, ToolPaths, DEFAULT_CONFIG_YML};
pub use levels::AnalysisCategory;
pub use loader::{
    directory_ancestors, find_config_files, load_config, load_config_file,
    load_config_with_user_dir, parse_config, user_config_dir, ConfigSource, LoadedConfig,
    DEFAULT_CONFIG_FILE, USER_CONFIG_FILE,
};
