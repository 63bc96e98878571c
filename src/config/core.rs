use serde::{Deserialize, Serialize};

use crate::errors::{PvsError, Result};

/// Configuration written by `pvscheck init` and used when no file is found
pub const DEFAULT_CONFIG_YML: &str = r#"PvsThreads: 4
BuildThreads: 4

# Specifies analyzer(s) and level(s) to be used for filtering.
# Set 0 to disable a category. Levels go from 1 (high) to 3 (low).
Levels:
    # General Analysis
    General: 2

    # 64-bit errors
    64-bit: 2

    # Micro-optimizations
    Optimizations: 2

    # Customers Specific Requests
    Customers: 0

    # MISRA
    MISRA: 0

# Extra suppression rules, written as //-<rule> into the rules file
Checks:
    # This file is marked with copyleft license
    - V::1042

    # Dangerous magic number
    - V::112

    # Qt warnings
    - V:qCDebug:1044
    - V:qCInfo:1044
    - V:qCWarning:1044
    - V:qCCritical:1044
"#;

/// Root configuration consumed by the check pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Worker count passed to `pvs-studio-analyzer analyze -j`
    #[serde(rename = "PvsThreads", default = "default_threads")]
    pub pvs_threads: u32,

    /// Worker count passed to `make -j`
    #[serde(rename = "BuildThreads", default = "default_threads")]
    pub build_threads: u32,

    /// Severity level per analysis category
    #[serde(rename = "Levels", default)]
    pub levels: Levels,

    /// Suppression rules appended to the generated rules file
    #[serde(rename = "Checks", default)]
    pub checks: Vec<String>,

    /// Names or paths of the external programs
    #[serde(rename = "Tools", default)]
    pub tools: ToolPaths,
}

fn default_threads() -> u32 {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pvs_threads: default_threads(),
            build_threads: default_threads(),
            levels: Levels::default(),
            checks: [
                "V::1042",
                "V::112",
                "V:qCDebug:1044",
                "V:qCInfo:1044",
                "V:qCWarning:1044",
                "V:qCCritical:1044",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tools: ToolPaths::default(),
        }
    }
}

impl Config {
    /// Reject values the external tools cannot make sense of
    pub fn validate(&self) -> Result<()> {
        if self.pvs_threads == 0 {
            return Err(PvsError::config("PvsThreads must be at least 1"));
        }
        if self.build_threads == 0 {
            return Err(PvsError::config("BuildThreads must be at least 1"));
        }
        for (category, level) in self.levels.iter() {
            if level > 3 {
                return Err(PvsError::config(format!(
                    "level for {} must be between 0 and 3, got {}",
                    category.name(),
                    level
                )));
            }
        }
        Ok(())
    }
}

/// Per-category severity levels; 0 disables a category.
///
/// A `Levels` block present in a file starts from all-zero, so only the
/// categories it names are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
    #[serde(rename = "General", default)]
    pub general: u8,
    #[serde(rename = "64-bit", default)]
    pub x64: u8,
    #[serde(rename = "Optimizations", default)]
    pub optimizations: u8,
    #[serde(rename = "Customers", default)]
    pub customers: u8,
    #[serde(rename = "MISRA", default)]
    pub misra: u8,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            general: 2,
            x64: 2,
            optimizations: 2,
            customers: 0,
            misra: 0,
        }
    }
}

impl Levels {
    /// All levels set to zero
    pub const fn disabled() -> Self {
        Self {
            general: 0,
            x64: 0,
            optimizations: 0,
            customers: 0,
            misra: 0,
        }
    }
}

/// External executables, overridable for non-standard installs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(rename = "CMake", default = "default_cmake")]
    pub cmake: String,
    #[serde(rename = "Make", default = "default_make")]
    pub make: String,
    #[serde(rename = "QMake", default = "default_qmake")]
    pub qmake: String,
    #[serde(rename = "Analyzer", default = "default_analyzer")]
    pub analyzer: String,
    #[serde(rename = "Converter", default = "default_converter")]
    pub converter: String,
    #[serde(rename = "Cli", default = "default_cli")]
    pub cli: String,
}

fn default_cmake() -> String {
    "cmake".into()
}

fn default_make() -> String {
    "make".into()
}

fn default_qmake() -> String {
    "qmake".into()
}

fn default_analyzer() -> String {
    "pvs-studio-analyzer".into()
}

fn default_converter() -> String {
    "plog-converter".into()
}

fn default_cli() -> String {
    "pvs-studio".into()
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            cmake: default_cmake(),
            make: default_make(),
            qmake: default_qmake(),
            analyzer: default_analyzer(),
            converter: default_converter(),
            cli: default_cli(),
        }
    }
}
