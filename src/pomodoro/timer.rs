//! Countdown state machine.
//!
//! The machine itself never touches clocks or audio. Each transition returns
//! the side effects it requires and the owning session carries them out.

use super::pomodoro::{PomodoroMode, format_time};
use super::quotes::QuotePicker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTicking,
    StopTicking,
    StartAlert,
    StopAlert,
}

/// Which decorative representation the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKey {
    Idle,
    Working,
    Break,
}

impl AssetKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKey::Idle => "idle",
            AssetKey::Working => "working",
            AssetKey::Break => "break",
        }
    }
}

/// Read-only view handed to the presentation layer after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub mode: PomodoroMode,
    pub time: String,
    pub running: bool,
    pub quote: &'static str,
    pub asset: AssetKey,
}

#[derive(Debug)]
pub struct PomodoroTimer {
    mode: PomodoroMode,
    remaining_secs: u64,
    running: bool,
    quote: &'static str,
    quotes: QuotePicker,
}

impl PomodoroTimer {
    pub fn new(mut quotes: QuotePicker) -> Self {
        let mode = PomodoroMode::Work;
        let quote = quotes.draw(mode);
        Self {
            mode,
            remaining_secs: mode.duration_secs(),
            running: false,
            quote,
            quotes,
        }
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn quote(&self) -> &'static str {
        self.quote
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.remaining_secs == 0 {
            Phase::Expired
        } else {
            Phase::Idle
        }
    }

    pub fn asset(&self) -> AssetKey {
        match (self.running, self.mode) {
            (false, _) => AssetKey::Idle,
            (true, PomodoroMode::Work) => AssetKey::Working,
            (true, PomodoroMode::Break) => AssetKey::Break,
        }
    }

    /// Switches to `mode` and restarts its countdown, even if it is already active.
    pub fn select_mode(&mut self, mode: PomodoroMode) -> Vec<Effect> {
        self.mode = mode;
        self.remaining_secs = mode.duration_secs();
        self.running = false;
        self.quote = self.quotes.draw(mode);
        vec![Effect::StopTicking, Effect::StopAlert]
    }

    /// Play/pause. An expired countdown is only rewound; the next press starts it.
    pub fn toggle_play(&mut self) -> Vec<Effect> {
        if self.remaining_secs == 0 {
            self.remaining_secs = self.mode.duration_secs();
            return vec![Effect::StopAlert];
        }

        self.running = !self.running;
        if self.running {
            self.quote = self.quotes.draw(self.mode);
            vec![Effect::StopAlert, Effect::StartTicking]
        } else {
            vec![Effect::StopAlert, Effect::StopTicking]
        }
    }

    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }

        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return Vec::new();
        }

        self.remaining_secs = 0;
        self.running = false;
        vec![Effect::StopTicking, Effect::StartAlert]
    }

    pub fn projection(&self) -> Projection {
        Projection {
            mode: self.mode,
            time: format_time(self.remaining_secs),
            running: self.running,
            quote: self.quote,
            asset: self.asset(),
        }
    }
}
