//! The only path from the front end to the window-owning host.
//!
//! Commands are fire-and-forget: nothing is awaited and nothing comes back.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeCommand {
    #[serde(rename = "close-window")]
    Close,
    #[serde(rename = "minimize-window")]
    Minimize,
}

impl BridgeCommand {
    pub fn wire_name(&self) -> &'static str {
        match self {
            BridgeCommand::Close => "close-window",
            BridgeCommand::Minimize => "minimize-window",
        }
    }
}

impl fmt::Display for BridgeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

pub trait HostBridge {
    /// Posts `command` to the host. Must not block and must not fail.
    fn send(&self, command: BridgeCommand);

    fn request_close(&self) {
        self.send(BridgeCommand::Close);
    }

    fn request_minimize(&self) {
        self.send(BridgeCommand::Minimize);
    }
}

/// Stands in when no host is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBridge;

impl HostBridge for NoopBridge {
    fn send(&self, command: BridgeCommand) {
        debug!(%command, "no host attached, dropping bridge command");
    }
}

pub type CommandSender = mpsc::UnboundedSender<BridgeCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<BridgeCommand>;

pub fn create_command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}

/// Hands commands to a host task running in the same process.
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    tx: CommandSender,
}

impl ChannelBridge {
    pub fn new(tx: CommandSender) -> Self {
        Self { tx }
    }
}

impl HostBridge for ChannelBridge {
    fn send(&self, command: BridgeCommand) {
        if self.tx.send(command).is_err() {
            debug!(%command, "host task gone, dropping bridge command");
        }
    }
}

impl<B: HostBridge + ?Sized> HostBridge for Box<B> {
    fn send(&self, command: BridgeCommand) {
        (**self).send(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&BridgeCommand::Close).unwrap();
        assert_eq!(json, r#"{"type":"close-window"}"#);

        let cmd: BridgeCommand = serde_json::from_str(r#"{"type":"minimize-window"}"#).unwrap();
        assert_eq!(cmd, BridgeCommand::Minimize);

        assert!(serde_json::from_str::<BridgeCommand>(r#"{"type":"spawn-shell"}"#).is_err());
    }

    #[test]
    fn test_noop_bridge_swallows_requests() {
        let bridge = NoopBridge;
        bridge.request_close();
        bridge.request_minimize();
    }

    #[test]
    fn test_channel_bridge_forwards() {
        let (tx, mut rx) = create_command_channel();
        let bridge = ChannelBridge::new(tx);
        bridge.request_minimize();
        bridge.request_close();
        assert_eq!(rx.try_recv().unwrap(), BridgeCommand::Minimize);
        assert_eq!(rx.try_recv().unwrap(), BridgeCommand::Close);
    }

    #[test]
    fn test_channel_bridge_without_host_is_silent() {
        let (tx, rx) = create_command_channel();
        drop(rx);
        let bridge = ChannelBridge::new(tx);
        bridge.request_close();
    }
}
