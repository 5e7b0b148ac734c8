use std::str::FromStr;

use tokio::sync::mpsc;

use crate::error::Error;
use crate::pomodoro::pomodoro::PomodoroMode;

/// Something the user asked for from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectMode(PomodoroMode),
    TogglePlay,
    Minimize,
    Close,
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "play" | "pause" => Ok(Intent::TogglePlay),
            "m" | "min" | "minimize" => Ok(Intent::Minimize),
            "q" | "x" | "quit" | "close" => Ok(Intent::Close),
            other => other
                .parse::<PomodoroMode>()
                .map(Intent::SelectMode)
                .map_err(|_| Error::InvalidIntent(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Intent(Intent),
    /// Tick from the schedule with the given generation.
    Tick(u64),
    /// Input closed; tear everything down.
    Shutdown,
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
