use tracing::{debug, info, warn};

use super::hypr::WindowHost;
use crate::bridge::bridge::{BridgeCommand, CommandReceiver};

/// Applies one bridge command to the focused window. Never fails: with no
/// focused window the command is a no-op, and host errors are only logged.
pub async fn execute<H: WindowHost>(host: &H, command: BridgeCommand) {
    let window = match host.focused_window().await {
        Ok(Some(window)) => window,
        Ok(None) => {
            debug!(%command, "no focused window, ignoring");
            return;
        }
        Err(e) => {
            warn!(%command, error = %e, "could not query focused window");
            return;
        }
    };

    let result = match command {
        BridgeCommand::Close => host.close(&window).await,
        BridgeCommand::Minimize => host.minimize(&window).await,
    };

    match result {
        Ok(()) => info!(%command, address = %window.address, title = %window.title, "window command executed"),
        Err(e) => warn!(%command, address = %window.address, error = %e, "window command failed"),
    }
}

/// Host loop: runs until every bridge sender is gone.
pub async fn serve_commands<H: WindowHost>(host: H, mut commands: CommandReceiver) {
    while let Some(command) = commands.recv().await {
        execute(&host, command).await;
    }
    debug!("bridge closed, host loop finished");
}
