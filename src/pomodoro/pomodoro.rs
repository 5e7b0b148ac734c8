use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub const TICK_INTERVAL_MS: u64 = 1000; // One countdown step per second
pub const POMODORO_WORK_MINUTES: u64 = 25; // Work session length
pub const POMODORO_BREAK_MINUTES: u64 = 5; // Break length

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroMode {
    Work,
    Break,
}

impl PomodoroMode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            PomodoroMode::Work => "WORK",
            PomodoroMode::Break => "BREAK",
        }
    }

    pub(crate) fn emoji(&self) -> &'static str {
        match self {
            PomodoroMode::Work => "💼",
            PomodoroMode::Break => "☕",
        }
    }

    /// Full countdown length for this mode, in seconds.
    pub fn duration_secs(&self) -> u64 {
        match self {
            PomodoroMode::Work => POMODORO_WORK_MINUTES * 60,
            PomodoroMode::Break => POMODORO_BREAK_MINUTES * 60,
        }
    }
}

impl fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PomodoroMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "w" => Ok(PomodoroMode::Work),
            "break" | "b" => Ok(PomodoroMode::Break),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// Renders a second count as zero-padded `MM:SS`.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
