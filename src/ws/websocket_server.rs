use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};

use crate::bridge::bridge::{BridgeCommand, CommandSender};
use crate::error::Result;

pub async fn start_websocket_server(addr: SocketAddr, commands: CommandSender) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "window host listening");
    serve(listener, commands).await;
    Ok(())
}

pub async fn serve(listener: TcpListener, commands: CommandSender) {
    while let Ok((stream, peer_addr)) = listener.accept().await {
        debug!(%peer_addr, "new bridge connection");
        tokio::spawn(handle_connection(stream, peer_addr, commands.clone()));
    }
}

/// Reads bridge commands from one front end. Nothing is sent back beyond pongs.
async fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, commands: CommandSender) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(%peer_addr, error = %e, "websocket handshake failed");
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<BridgeCommand>(&text) {
                Ok(command) => {
                    debug!(%peer_addr, %command, "bridge command received");
                    if commands.send(command).is_err() {
                        warn!(%command, "host loop gone, dropping command");
                        break;
                    }
                }
                Err(e) => {
                    warn!(%peer_addr, error = %e, "ignoring unknown bridge message");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(data)) => {
                if let Err(e) = ws_sender.send(Message::Pong(data)).await {
                    warn!(%peer_addr, error = %e, "failed to send pong");
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(%peer_addr, error = %e, "websocket error");
                break;
            }
        }
    }

    debug!(%peer_addr, "bridge connection closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::bridge::{HostBridge, create_command_channel};
    use crate::alert::alert::SilentAlert;
    use crate::app;
    use crate::bridge::ws_bridge::{flush, spawn_ws_bridge};
    use crate::events::{Event, Intent, create_event_channel};
    use crate::pomodoro::quotes::QuotePicker;
    use crate::pomodoro::session::Session;
    use crate::pomodoro::timer::PomodoroTimer;
    use tokio::time::{Duration, timeout};
    use tokio_tungstenite::connect_async;

    async fn local_server() -> (SocketAddr, crate::bridge::bridge::CommandReceiver) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = create_command_channel();
        tokio::spawn(serve(listener, tx));
        (addr, rx)
    }

    #[tokio::test]
    async fn test_bridge_commands_reach_host() {
        let (addr, mut rx) = local_server().await;
        let (bridge, _task) = spawn_ws_bridge(format!("ws://{addr}"));
        bridge.request_minimize();
        bridge.request_close();

        let first = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        let second = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(first, Some(BridgeCommand::Minimize));
        assert_eq!(second, Some(BridgeCommand::Close));
    }

    #[tokio::test]
    async fn test_unknown_messages_are_dropped() {
        let (addr, mut rx) = local_server().await;
        let (mut ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        ws.send(Message::Text(r#"{"type":"exec","cmd":"rm"}"#.to_string()))
            .await
            .unwrap();
        ws.send(Message::Text("not json".to_string())).await.unwrap();
        ws.send(Message::Text(r#"{"type":"close-window"}"#.to_string()))
            .await
            .unwrap();

        let received = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(received, Some(BridgeCommand::Close));
    }

    #[tokio::test]
    async fn test_close_reaches_host_before_front_end_exits() {
        let (addr, mut rx) = local_server().await;
        let (bridge, task) = spawn_ws_bridge(format!("ws://{addr}"));
        let (tx, events) = create_event_channel();
        let session = Session::new(
            PomodoroTimer::new(QuotePicker::seeded(5)),
            SilentAlert::default(),
            bridge,
            tx.clone(),
        );

        tx.send(Event::Intent(Intent::Close)).unwrap();
        app::run(session, events).await;
        flush(task).await;

        assert_eq!(rx.try_recv().unwrap(), BridgeCommand::Close);
    }
}
