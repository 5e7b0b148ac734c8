use std::path::PathBuf;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

pub const DEFAULT_PLAYER: &str = "paplay";
pub const DEFAULT_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const REPEAT_GAP_MS: u64 = 400; // Pause between repetitions of the tone

/// The looping cue played when a countdown reaches zero.
///
/// Both calls must be cheap and must never fail: playback problems are the
/// alert's own business.
pub trait CompletionAlert {
    fn start(&mut self);
    /// Idempotent.
    fn stop(&mut self);
    fn is_active(&self) -> bool;
}

impl<A: CompletionAlert + ?Sized> CompletionAlert for Box<A> {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Repeats `player <sound>` until stopped.
#[derive(Debug)]
pub struct SoundAlert {
    player: String,
    sound: PathBuf,
    task: Option<JoinHandle<()>>,
}

impl SoundAlert {
    pub fn new(player: impl Into<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            player: player.into(),
            sound: sound.into(),
            task: None,
        }
    }
}

impl CompletionAlert for SoundAlert {
    fn start(&mut self) {
        if self.is_active() {
            return;
        }
        info!(player = %self.player, sound = %self.sound.display(), "completion alert started");
        let player = self.player.clone();
        let sound = self.sound.clone();
        self.task = Some(tokio::spawn(play_loop(player, sound)));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("completion alert stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SoundAlert {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn play_loop(player: String, sound: PathBuf) {
    loop {
        // kill_on_drop stops the current repetition when the task is aborted.
        let status = Command::new(&player)
            .arg(&sound)
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                warn!(%player, %status, "alert playback exited unsuccessfully");
                return;
            }
            Err(e) => {
                warn!(%player, error = %e, "failed to start alert playback");
                return;
            }
        }

        sleep(Duration::from_millis(REPEAT_GAP_MS)).await;
    }
}

/// Used with `--mute`: keeps the alert state but makes no sound.
#[derive(Debug, Default)]
pub struct SilentAlert {
    active: bool,
}

impl CompletionAlert for SilentAlert {
    fn start(&mut self) {
        info!("completion alert started (muted)");
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_player_is_not_fatal() {
        let mut alert = SoundAlert::new("definitely-not-a-real-player-binary", "/nonexistent.oga");
        alert.start();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // The loop gave up on its own.
        assert!(!alert.is_active());
        alert.stop();
        alert.stop();
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut alert = SoundAlert::new("sleep", "30");
        alert.stop();
        alert.start();
        assert!(alert.is_active());
        alert.stop();
        assert!(!alert.is_active());
        alert.stop();
    }

    #[test]
    fn test_silent_alert_tracks_state() {
        let mut alert = SilentAlert::default();
        alert.start();
        assert!(alert.is_active());
        alert.stop();
        alert.stop();
        assert!(!alert.is_active());
    }
}
