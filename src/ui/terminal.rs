use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::events::{Event, EventSender, Intent};
use crate::pomodoro::timer::Projection;

pub const HEADER: &str = "WORK FASTER ♥";
pub const HELP: &str = "[w] work  [b] break  [p/enter] play/pause  [m] minimize  [q] close";

pub fn print_header() {
    println!("{HEADER}");
    println!("{HELP}");
}

pub fn render_status(view: &Projection) -> String {
    let control = if view.running { "Pause" } else { "Play" };
    format!(
        "{} {:<5} {}  [{}]  ({})  \"{}\"",
        view.mode.emoji(),
        view.mode.as_str(),
        view.time,
        control,
        view.asset.as_str(),
        view.quote
    )
}

/// Redraws the status line in place.
pub fn draw(view: &Projection) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "\r\x1b[2K{}", render_status(view));
    let _ = stdout.flush();
}

/// Turns stdin lines into intents. End of input becomes `Event::Shutdown`.
pub fn spawn_input_reader(events: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match line.parse::<Intent>() {
                    Ok(intent) => {
                        debug!(?intent, "input");
                        if events.send(Event::Intent(intent)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "ignored input");
                        println!("{e}. {HELP}");
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = events.send(Event::Shutdown);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::pomodoro::PomodoroMode;
    use crate::pomodoro::timer::AssetKey;

    #[test]
    fn test_render_idle_work() {
        let view = Projection {
            mode: PomodoroMode::Work,
            time: "25:00".to_string(),
            running: false,
            quote: "One task at a time.",
            asset: AssetKey::Idle,
        };
        let line = render_status(&view);
        assert!(line.contains("WORK"));
        assert!(line.contains("25:00"));
        assert!(line.contains("[Play]"));
        assert!(line.contains("(idle)"));
        assert!(line.ends_with("\"One task at a time.\""));
    }

    #[test]
    fn test_render_running_break() {
        let view = Projection {
            mode: PomodoroMode::Break,
            time: "04:59".to_string(),
            running: true,
            quote: "Rest is part of the work.",
            asset: AssetKey::Break,
        };
        let line = render_status(&view);
        assert!(line.contains("BREAK"));
        assert!(line.contains("[Pause]"));
        assert!(line.contains("(break)"));
    }
}
