use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::alert::alert::{DEFAULT_PLAYER, DEFAULT_SOUND};
use crate::error::{Error, Result};

pub const DEFAULT_WS_ADDR: &str = "127.0.0.1:8765";

/// Command-line options. Durations are fixed and not configurable here.
#[derive(Debug, Parser, Clone)]
#[command(name = "work_faster", about = "Pomodoro timer with window controls", version)]
pub struct Config {
    /// Run only the window host, accepting bridge commands over websocket
    #[arg(long, conflicts_with_all = ["bridge_url", "no_host"])]
    pub daemon: bool,

    /// Address the window host listens on in daemon mode
    #[arg(long, default_value = DEFAULT_WS_ADDR)]
    pub ws_addr: SocketAddr,

    /// Send window commands to a host started with --daemon
    #[arg(long, env = "WORK_FASTER_BRIDGE_URL", conflicts_with = "no_host")]
    pub bridge_url: Option<String>,

    /// Run without any window host; close/minimize do nothing
    #[arg(long, default_value_t = false)]
    pub no_host: bool,

    /// Sound file looped when a countdown finishes
    #[arg(long, default_value = DEFAULT_SOUND)]
    pub sound: PathBuf,

    /// Player command used for the completion sound
    #[arg(long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Do not play the completion sound
    #[arg(long, default_value_t = false)]
    pub mute: bool,

    /// Seed for quote selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long, short = 'l')]
    pub log: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.bridge_url {
            if !(url.starts_with("ws://") || url.starts_with("wss://")) {
                return Err(Error::Config(format!(
                    "--bridge-url must be a ws:// or wss:// url, got {url:?}"
                )));
            }
        }
        if self.player.trim().is_empty() {
            return Err(Error::Config("--player must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.local/share/work_faster/work_faster.log",
                std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
            ))
        })
    }
}
