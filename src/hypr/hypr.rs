use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

const MINIMIZED_WORKSPACE: &str = "special:minimized";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HyprlandWindow {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub title: String,
}

/// OS window operations the host performs on behalf of the front end.
pub trait WindowHost {
    async fn focused_window(&self) -> Result<Option<HyprlandWindow>>;
    async fn close(&self, window: &HyprlandWindow) -> Result<()>;
    async fn minimize(&self, window: &HyprlandWindow) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Hyprland;

impl WindowHost for Hyprland {
    async fn focused_window(&self) -> Result<Option<HyprlandWindow>> {
        let output = Command::new("hyprctl")
            .args(["activewindow", "-j"])
            .output()
            .await?;

        if !output.status.success() {
            return Ok(None);
        }

        parse_active_window(&String::from_utf8_lossy(&output.stdout))
    }

    async fn close(&self, window: &HyprlandWindow) -> Result<()> {
        dispatch(&["closewindow", &format!("address:{}", window.address)]).await
    }

    async fn minimize(&self, window: &HyprlandWindow) -> Result<()> {
        dispatch(&[
            "movetoworkspacesilent",
            &format!("{MINIMIZED_WORKSPACE},address:{}", window.address),
        ])
        .await
    }
}

async fn dispatch(args: &[&str]) -> Result<()> {
    let output = Command::new("hyprctl")
        .arg("dispatch")
        .args(args)
        .output()
        .await?;
    let reply = String::from_utf8_lossy(&output.stdout);
    debug!(?args, status = %output.status, reply = %reply.trim(), "hyprctl dispatch");

    if !output.status.success() {
        return Err(Error::Hyprctl(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    check_dispatch_reply(&reply)
}

/// hyprctl exits 0 even for rejected dispatches; only a bare `ok` means success.
pub fn check_dispatch_reply(reply: &str) -> Result<()> {
    match reply.trim() {
        "ok" => Ok(()),
        "" => Err(Error::Hyprctl("empty reply".to_string())),
        other => Err(Error::Hyprctl(other.to_string())),
    }
}

/// `hyprctl activewindow -j` prints `{}` (or nothing) when no window has focus.
pub fn parse_active_window(stdout: &str) -> Result<Option<HyprlandWindow>> {
    if stdout.trim().is_empty() {
        return Ok(None);
    }

    let window: HyprlandWindow = serde_json::from_str(stdout)?;
    if window.address.is_empty() {
        return Ok(None);
    }
    Ok(Some(window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_focused_window() {
        let json = r#"{"address":"0x55d1c0ffee","title":"work_faster","class":"kitty"}"#;
        let window = parse_active_window(json).unwrap().unwrap();
        assert_eq!(window.address, "0x55d1c0ffee");
        assert_eq!(window.title, "work_faster");
    }

    #[test]
    fn test_parse_no_focused_window() {
        assert_eq!(parse_active_window("").unwrap(), None);
        assert_eq!(parse_active_window("  \n").unwrap(), None);
        assert_eq!(parse_active_window("{}").unwrap(), None);
    }

    #[test]
    fn test_dispatch_reply() {
        assert!(check_dispatch_reply("ok\n").is_ok());

        let err = check_dispatch_reply("No such window found").unwrap_err();
        assert!(matches!(err, Error::Hyprctl(ref msg) if msg == "No such window found"));
        assert!(matches!(check_dispatch_reply("  "), Err(Error::Hyprctl(_))));
    }

    #[test]
    fn test_parse_garbage_is_an_error() {
        assert!(parse_active_window("Invalid").is_err());
    }
}
