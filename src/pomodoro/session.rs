use tokio::time::Duration;
use tracing::{debug, info};

use super::pomodoro::{PomodoroMode, TICK_INTERVAL_MS};
use super::ticker::TickSchedule;
use super::timer::{Effect, PomodoroTimer, Projection};
use crate::alert::alert::CompletionAlert;
use crate::bridge::bridge::HostBridge;
use crate::events::{EventSender, Intent};

/// Whether the front end should keep running after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the timer plus every resource its transitions acquire: the tick
/// schedule, the completion alert and the host bridge.
pub struct Session<A: CompletionAlert, B: HostBridge> {
    timer: PomodoroTimer,
    schedule: Option<TickSchedule>,
    next_generation: u64,
    tick_period: Duration,
    alert: A,
    bridge: B,
    events: EventSender,
}

impl<A: CompletionAlert, B: HostBridge> Session<A, B> {
    pub fn new(timer: PomodoroTimer, alert: A, bridge: B, events: EventSender) -> Self {
        Self {
            timer,
            schedule: None,
            next_generation: 0,
            tick_period: Duration::from_millis(TICK_INTERVAL_MS),
            alert,
            bridge,
            events,
        }
    }

    #[cfg(test)]
    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    #[cfg(test)]
    pub fn alert(&self) -> &A {
        &self.alert
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn projection(&self) -> Projection {
        self.timer.projection()
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::SelectMode(mode) => self.select_mode(mode),
            Intent::TogglePlay => self.toggle_play(),
            Intent::Minimize => {
                self.alert.stop();
                self.bridge.request_minimize();
            }
            Intent::Close => {
                self.close();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    pub fn select_mode(&mut self, mode: PomodoroMode) {
        info!("{} Switched to {} mode", mode.emoji(), mode.as_str());
        let effects = self.timer.select_mode(mode);
        self.apply(effects);
    }

    pub fn toggle_play(&mut self) {
        let effects = self.timer.toggle_play();
        debug!(phase = ?self.timer.phase(), remaining = self.timer.remaining_secs(), "play toggled");
        self.apply(effects);
    }

    /// Handles a tick from the schedule of `generation`; ticks from a
    /// cancelled schedule are discarded. Returns whether state changed.
    pub fn handle_tick(&mut self, generation: u64) -> bool {
        match &self.schedule {
            Some(schedule) if schedule.generation() == generation => {}
            _ => {
                debug!(generation, "stale tick dropped");
                return false;
            }
        }
        let effects = self.timer.tick();
        self.apply(effects);
        true
    }

    /// Silences everything, cancels the schedule and asks the host to close
    /// the window.
    pub fn close(&mut self) {
        self.teardown();
        self.bridge.request_close();
    }

    pub fn teardown(&mut self) {
        self.schedule = None;
        self.alert.stop();
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTicking => {
                    let generation = self.next_generation;
                    self.next_generation += 1;
                    self.schedule = Some(TickSchedule::start(
                        self.tick_period,
                        generation,
                        self.events.clone(),
                    ));
                }
                Effect::StopTicking => self.schedule = None,
                Effect::StartAlert => {
                    let mode = self.timer.mode();
                    info!(
                        "🔔 {} session complete at {}",
                        mode.as_str(),
                        chrono::Local::now().format("%H:%M:%S")
                    );
                    self.alert.start();
                }
                Effect::StopAlert => self.alert.stop(),
            }
        }
    }
}

impl<A: CompletionAlert, B: HostBridge> Drop for Session<A, B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
