use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval_at, Instant};
use tracing::debug;

use crate::events::{Event, EventSender};

/// A running 1 Hz schedule. Dropping it cancels the schedule.
#[derive(Debug)]
pub struct TickSchedule {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickSchedule {
    /// Starts ticking one `period` from now, tagging every tick with `generation`.
    pub fn start(period: Duration, generation: u64, events: EventSender) -> Self {
        let task = tokio::spawn(async move {
            let mut timer_interval = interval_at(Instant::now() + period, period);
            timer_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer_interval.tick().await;
                if events.send(Event::Tick(generation)).is_err() {
                    break;
                }
            }
        });
        debug!(generation, "tick schedule started");
        Self { generation, task }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        self.task.abort();
        debug!(generation = self.generation, "tick schedule cancelled");
    }
}
