//! System script notification via `osascript` (macOS banner)

use anyhow::Result;
use tokio::process::Command;

use crate::classify::StyledPayload;
use crate::delivery::notifier::run_checked;

/// Show a Notification Center banner with AppleScript's
/// `display notification`. Payload text is sanitized upstream and quoted
/// here, so nothing can escape the script string.
pub async fn send_osascript(payload: &StyledPayload) -> Result<()> {
    let script = format!(
        "display notification {} with title {}",
        applescript_quote(&payload.message),
        applescript_quote(&payload.title),
    );
    let mut cmd = Command::new("osascript");
    cmd.arg("-e").arg(script);
    run_checked("osascript", cmd).await
}

/// Quote a string for interpolation into an AppleScript literal.
fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
