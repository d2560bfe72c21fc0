//! External notifier binaries: terminal-notifier, notify-send, alerter

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::debug;

use crate::classify::StyledPayload;
use crate::env_probe::EnvironmentSnapshot;
use crate::payload::Level;

/// Notification group tag, so repeated hook firings replace rather than
/// stack in Notification Center.
const GROUP_ID: &str = "code-hook-notify";

/// Argument list for `terminal-notifier`, separate from the spawn so the
/// click/focus wiring can be asserted.
fn terminal_notifier_args(payload: &StyledPayload, snap: &EnvironmentSnapshot) -> Vec<String> {
    let mut args = vec![
        "-title".to_string(),
        payload.title.clone(),
        "-message".to_string(),
        payload.message.clone(),
        "-group".to_string(),
        GROUP_ID.to_string(),
    ];
    if let Some(bundle_id) = &snap.parent_app.bundle_id {
        args.push("-activate".to_string());
        args.push(bundle_id.clone());
    }
    args
}

/// macOS `terminal-notifier`. When the parent application's bundle id was
/// detected, a click on the notification re-focuses that application.
pub async fn send_terminal_notifier(
    payload: &StyledPayload,
    snap: &EnvironmentSnapshot,
) -> Result<()> {
    if let Some(bundle_id) = &snap.parent_app.bundle_id {
        debug!(bundle_id = %bundle_id, "Click will re-focus parent application");
    }
    let mut cmd = Command::new("terminal-notifier");
    cmd.args(terminal_notifier_args(payload, snap));
    run_checked("terminal-notifier", cmd).await
}

/// `notify-send` on Linux, `alerter` as the macOS standalone fallback.
pub async fn send_external_tool(
    payload: &StyledPayload,
    snap: &EnvironmentSnapshot,
) -> Result<()> {
    if snap.notifiers.notify_send {
        let urgency = match payload.level {
            Level::Error => "critical",
            Level::Warning => "normal",
            Level::Info => "low",
        };
        let mut cmd = Command::new("notify-send");
        cmd.arg("--app-name")
            .arg(GROUP_ID)
            .arg("--urgency")
            .arg(urgency)
            .arg(&payload.title)
            .arg(&payload.message);
        return run_checked("notify-send", cmd).await;
    }
    if snap.notifiers.alerter {
        let mut cmd = Command::new("alerter");
        cmd.arg("-title")
            .arg(&payload.title)
            .arg("-message")
            .arg(&payload.message)
            .arg("-timeout")
            .arg("5");
        return run_checked("alerter", cmd).await;
    }
    bail!("no external notifier tool available")
}

/// Run a notifier command, treating a non-zero exit as a delivery failure.
/// The child is killed if the attempt future is dropped at a timeout.
pub(crate) async fn run_checked(name: &str, mut cmd: Command) -> Result<()> {
    let output = cmd
        .kill_on_drop(true)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("failed to execute {name}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{name} exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}
