use clap::Parser;
use tracing::info;

mod alert;
mod app;
mod bridge;
mod config;
mod error;
mod events;
mod hypr;
mod logging;
mod pomodoro;
mod ui;
mod ws;

use alert::alert::{CompletionAlert, SilentAlert, SoundAlert};
use bridge::bridge::{ChannelBridge, HostBridge, NoopBridge, create_command_channel};
use bridge::ws_bridge::{flush, spawn_ws_bridge};
use config::Config;
use events::create_event_channel;
use hypr::host::serve_commands;
use hypr::hypr::Hyprland;
use pomodoro::pomodoro::{POMODORO_BREAK_MINUTES, POMODORO_WORK_MINUTES};
use pomodoro::quotes::QuotePicker;
use pomodoro::session::Session;
use pomodoro::timer::PomodoroTimer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    config.validate()?;
    logging::init(&config.log_path(), config.verbose)?;

    if config.daemon {
        return run_daemon_mode(&config).await;
    }

    info!(
        "Pomodoro settings: {}min work / {}min break",
        POMODORO_WORK_MINUTES, POMODORO_BREAK_MINUTES
    );

    let (events_tx, events_rx) = create_event_channel();

    let quotes = match config.seed {
        Some(seed) => QuotePicker::seeded(seed),
        None => QuotePicker::from_entropy(),
    };

    let alert: Box<dyn CompletionAlert> = if config.mute {
        Box::new(SilentAlert::default())
    } else {
        Box::new(SoundAlert::new(config.player.clone(), config.sound.clone()))
    };

    let mut host_commands = None;
    let mut remote_forwarder = None;
    let bridge: Box<dyn HostBridge> = if config.no_host {
        info!("running without a window host");
        Box::new(NoopBridge)
    } else if let Some(url) = &config.bridge_url {
        info!(%url, "using remote window host");
        let (bridge, task) = spawn_ws_bridge(url.clone());
        remote_forwarder = Some(task);
        Box::new(bridge)
    } else {
        let (tx, rx) = create_command_channel();
        host_commands = Some(rx);
        Box::new(ChannelBridge::new(tx))
    };

    let session = Session::new(PomodoroTimer::new(quotes), alert, bridge, events_tx.clone());
    let _input = ui::terminal::spawn_input_reader(events_tx);

    let front_end = app::run(session, events_rx);
    match host_commands {
        // The host loop ends once the session, and with it the bridge, is dropped.
        Some(commands) => {
            tokio::join!(front_end, serve_commands(Hyprland, commands));
        }
        None => front_end.await,
    }
    // The session, and with it the bridge, is gone; let queued commands reach the host.
    if let Some(task) = remote_forwarder {
        flush(task).await;
    }

    info!("session ended");
    // The stdin reader sits in a blocking read that would hold up runtime shutdown.
    std::process::exit(0);
}

/// Run as the window host only: remote front ends send commands over websocket.
async fn run_daemon_mode(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("WORK FASTER - window host");
    println!("Listening for bridge commands on ws://{}", config.ws_addr);

    let (tx, rx) = create_command_channel();
    let (served, ()) = tokio::join!(
        ws::websocket_server::start_websocket_server(config.ws_addr, tx),
        serve_commands(Hyprland, rx),
    );
    served?;
    Ok(())
}
