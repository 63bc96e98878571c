//! Translation of configured levels into analyzer arguments.
//!
//! The analyzer and the log converter take the same information in two
//! shapes:
//!
//! - `analysis-mode`: a bitmask of enabled categories, written into the
//!   temporary analyzer config
//! - `-a`: a filter expression such as `64:1;GA:1,2;OP:1,2,3`, passed to
//!   `plog-converter`

use super::core::{Config, Levels};

/// Analysis categories in the order the filter expression lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisCategory {
    X64,
    General,
    Optimizations,
    Customers,
    Misra,
}

impl AnalysisCategory {
    pub const ALL: [AnalysisCategory; 5] = [
        Self::X64,
        Self::General,
        Self::Optimizations,
        Self::Customers,
        Self::Misra,
    ];

    /// Key used in the converter filter expression
    pub const fn key(self) -> &'static str {
        match self {
            Self::X64 => "64",
            Self::General => "GA",
            Self::Optimizations => "OP",
            Self::Customers => "CS",
            Self::Misra => "MISRA",
        }
    }

    /// Bit contributed to `analysis-mode`. Bit 2 is reserved by the analyzer.
    pub const fn mode_bit(self) -> u32 {
        match self {
            Self::X64 => 1,
            Self::General => 4,
            Self::Optimizations => 8,
            Self::Customers => 16,
            Self::Misra => 32,
        }
    }

    /// Name as it appears in the configuration file
    pub const fn name(self) -> &'static str {
        match self {
            Self::X64 => "64-bit",
            Self::General => "General",
            Self::Optimizations => "Optimizations",
            Self::Customers => "Customers",
            Self::Misra => "MISRA",
        }
    }
}

impl Levels {
    pub fn get(&self, category: AnalysisCategory) -> u8 {
        match category {
            AnalysisCategory::X64 => self.x64,
            AnalysisCategory::General => self.general,
            AnalysisCategory::Optimizations => self.optimizations,
            AnalysisCategory::Customers => self.customers,
            AnalysisCategory::Misra => self.misra,
        }
    }

    /// Categories paired with their level, in filter-expression order
    pub fn iter(&self) -> impl Iterator<Item = (AnalysisCategory, u8)> + '_ {
        AnalysisCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Filter fragment for one category, `None` when the category is disabled
fn level_fragment(category: AnalysisCategory, level: u8) -> Option<String> {
    let levels = match level {
        1 => "1",
        2 => "1,2",
        3 => "1,2,3",
        _ => return None,
    };
    Some(format!("{}:{}", category.key(), levels))
}

impl Config {
    /// Bitmask of enabled categories for the `analysis-mode` setting
    pub fn analysis_mode(&self) -> u32 {
        self.levels
            .iter()
            .filter(|(_, level)| *level > 0)
            .map(|(category, _)| category.mode_bit())
            .sum()
    }

    /// Filter expression for `plog-converter -a`
    pub fn levels_expression(&self) -> String {
        self.levels
            .iter()
            .filter_map(|(category, level)| level_fragment(category, level))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_levels(levels: Levels) -> Config {
        Config {
            levels,
            ..Config::default()
        }
    }

    #[test]
    fn test_analysis_mode_general_and_misra() {
        let config = with_levels(Levels {
            general: 1,
            misra: 3,
            ..Levels::disabled()
        });
        assert_eq!(config.analysis_mode(), 36);
    }

    #[test]
    fn test_analysis_mode_all_disabled() {
        assert_eq!(with_levels(Levels::disabled()).analysis_mode(), 0);
    }

    #[test]
    fn test_analysis_mode_defaults() {
        // 64-bit + General + Optimizations
        assert_eq!(Config::default().analysis_mode(), 1 + 4 + 8);
    }

    #[test]
    fn test_level_fragments() {
        assert_eq!(level_fragment(AnalysisCategory::General, 0), None);
        assert_eq!(
            level_fragment(AnalysisCategory::General, 1).as_deref(),
            Some("GA:1")
        );
        assert_eq!(
            level_fragment(AnalysisCategory::General, 2).as_deref(),
            Some("GA:1,2")
        );
        assert_eq!(
            level_fragment(AnalysisCategory::General, 3).as_deref(),
            Some("GA:1,2,3")
        );
    }

    #[test]
    fn test_levels_expression_uses_fixed_category_order() {
        let config = with_levels(Levels {
            general: 2,
            x64: 1,
            optimizations: 3,
            customers: 1,
            misra: 2,
        });
        assert_eq!(
            config.levels_expression(),
            "64:1;GA:1,2;OP:1,2,3;CS:1;MISRA:1,2"
        );
    }

    #[test]
    fn test_levels_expression_empty_when_disabled() {
        assert_eq!(with_levels(Levels::disabled()).levels_expression(), "");
    }
}
