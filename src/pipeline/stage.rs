use std::fmt;

/// Position of a check run in its fixed sequence of steps.
///
/// Each stage names what has been completed; [`Stage::next`] is the only
/// transition and there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Located,
    Prepared,
    Configured,
    Built,
    Analyzed,
    Converted,
    Filtered,
    Reported,
    Done,
}

impl Stage {
    pub const fn next(self) -> Option<Stage> {
        match self {
            Self::Located => Some(Self::Prepared),
            Self::Prepared => Some(Self::Configured),
            Self::Configured => Some(Self::Built),
            Self::Built => Some(Self::Analyzed),
            Self::Analyzed => Some(Self::Converted),
            Self::Converted => Some(Self::Filtered),
            Self::Filtered => Some(Self::Reported),
            Self::Reported => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Whether reaching the next stage runs an external program
    pub const fn next_is_external(self) -> bool {
        matches!(
            self,
            Self::Prepared | Self::Configured | Self::Built | Self::Analyzed | Self::Converted
        )
    }

    /// What happens when leaving this stage, for log and error messages
    pub const fn next_action(self) -> &'static str {
        match self {
            Self::Located => "prepare workspace",
            Self::Prepared => "configure",
            Self::Configured => "build",
            Self::Built => "analyze",
            Self::Analyzed => "convert log",
            Self::Converted => "filter suppressed",
            Self::Filtered => "summarize",
            Self::Reported => "finish",
            Self::Done => "nothing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
