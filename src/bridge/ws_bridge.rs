use futures_util::{SinkExt, StreamExt};
use tokio::task::JoinHandle;
use tokio::time::{Duration, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};

use super::bridge::{ChannelBridge, CommandReceiver, create_command_channel};

const FLUSH_TIMEOUT_MS: u64 = 1000; // Upper bound on waiting for queued commands at exit

/// Bridge to a host running in another process (see `--daemon`).
///
/// The connection lives in a background task; if it cannot be established
/// every request is dropped with a log line. The returned task ends once
/// the bridge is dropped and every queued command has been delivered.
pub fn spawn_ws_bridge(url: String) -> (ChannelBridge, JoinHandle<()>) {
    let (tx, rx) = create_command_channel();
    let task = tokio::spawn(forward_commands(url, rx));
    (ChannelBridge::new(tx), task)
}

/// Waits for the forwarder to drain. Call after dropping the bridge.
pub async fn flush(task: JoinHandle<()>) {
    match timeout(Duration::from_millis(FLUSH_TIMEOUT_MS), task).await {
        Ok(Ok(())) => debug!("bridge commands flushed"),
        Ok(Err(e)) => warn!(error = %e, "bridge forwarder failed"),
        Err(_) => warn!("timed out flushing bridge commands"),
    }
}

async fn forward_commands(url: String, mut rx: CommandReceiver) {
    let mut ws_stream = match connect_async(url.as_str()).await {
        Ok((ws, _)) => {
            info!(%url, "connected to window host");
            ws
        }
        Err(e) => {
            warn!(%url, error = %e, "window host unreachable, bridge commands will be ignored");
            while let Some(command) = rx.recv().await {
                debug!(%command, "dropping bridge command");
            }
            return;
        }
    };

    while let Some(command) = rx.recv().await {
        let json = match serde_json::to_string(&command) {
            Ok(json) => json,
            Err(e) => {
                warn!(%command, error = %e, "failed to encode bridge command");
                continue;
            }
        };
        if let Err(e) = ws_stream.send(Message::Text(json)).await {
            warn!(%command, error = %e, "failed to send bridge command");
            break;
        }
    }

    // The host handles frames in order, so once it drops the connection
    // everything sent before the close frame has reached it.
    let _ = ws_stream.close(None).await;
    while let Some(Ok(_)) = ws_stream.next().await {}
}
