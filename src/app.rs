use tracing::info;

use crate::alert::alert::CompletionAlert;
use crate::bridge::bridge::HostBridge;
use crate::events::{Event, EventReceiver};
use crate::pomodoro::session::{Flow, Session};
use crate::ui::terminal;

/// Front-end loop: applies events to the session one at a time and redraws
/// after every change. Returns once the window is closed or input ends.
pub async fn run<A: CompletionAlert, B: HostBridge>(
    mut session: Session<A, B>,
    mut events: EventReceiver,
) {
    terminal::print_header();
    terminal::draw(&session.projection());

    while let Some(event) = events.recv().await {
        let changed = match event {
            Event::Intent(intent) => {
                if session.handle_intent(intent) == Flow::Exit {
                    info!("window closed");
                    break;
                }
                true
            }
            Event::Tick(generation) => session.handle_tick(generation),
            Event::Shutdown => {
                info!("input closed");
                break;
            }
        };
        if changed {
            terminal::draw(&session.projection());
        }
    }

    session.teardown();
    println!();
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::alert::alert::SilentAlert;
    use crate::bridge::bridge::BridgeCommand;
    use crate::events::{Intent, create_event_channel};
    use crate::pomodoro::pomodoro::PomodoroMode;
    use crate::pomodoro::quotes::QuotePicker;
    use crate::pomodoro::timer::PomodoroTimer;

    #[derive(Clone, Default)]
    struct RecordingBridge(Rc<RefCell<Vec<BridgeCommand>>>);

    impl HostBridge for RecordingBridge {
        fn send(&self, command: BridgeCommand) {
            self.0.borrow_mut().push(command);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_on_close() {
        let bridge = RecordingBridge::default();
        let (tx, rx) = create_event_channel();
        let session = Session::new(
            PomodoroTimer::new(QuotePicker::seeded(3)),
            SilentAlert::default(),
            bridge.clone(),
            tx.clone(),
        );

        tx.send(Event::Intent(Intent::SelectMode(PomodoroMode::Break))).unwrap();
        tx.send(Event::Intent(Intent::TogglePlay)).unwrap();
        tx.send(Event::Intent(Intent::Minimize)).unwrap();
        tx.send(Event::Intent(Intent::Close)).unwrap();

        run(session, rx).await;
        assert_eq!(
            *bridge.0.borrow(),
            vec![BridgeCommand::Minimize, BridgeCommand::Close]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_on_shutdown() {
        let bridge = RecordingBridge::default();
        let (tx, rx) = create_event_channel();
        let session = Session::new(
            PomodoroTimer::new(QuotePicker::seeded(3)),
            SilentAlert::default(),
            bridge.clone(),
            tx.clone(),
        );
        tx.send(Event::Shutdown).unwrap();

        run(session, rx).await;
        assert!(bridge.0.borrow().is_empty());
    }
}
