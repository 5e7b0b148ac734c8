use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid mode {0:?}, expected \"work\" or \"break\"")]
    InvalidMode(String),

    #[error("unknown command {0:?}")]
    InvalidIntent(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hyprctl dispatch failed: {0}")]
    Hyprctl(String),

    #[error("unexpected hyprctl output: {0}")]
    HyprctlOutput(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
