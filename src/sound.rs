//! Best-effort sound playback after a successful visual delivery
//!
//! Playback blocks inside the player binary, so the timeout here is much
//! longer than the notification timeout. A sound failure never affects the
//! delivery result; the process may also exit before playback completes.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::env_probe::{EnvironmentSnapshot, Platform, SoundTools};
use crate::hook::HookRole;

/// Playback can legitimately take a while; cap it anyway.
pub const SOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Short gap between the visual notification and the sound, to reduce
/// perceived desynchronization. Not a synchronization barrier.
pub const PLAYBACK_DELAY: Duration = Duration::from_millis(150);

/// Player candidates in preference order.
pub fn select_player(tools: &SoundTools) -> Option<&'static str> {
    if tools.afplay {
        Some("afplay")
    } else if tools.paplay {
        Some("paplay")
    } else if tools.aplay {
        Some("aplay")
    } else if tools.play {
        Some("play")
    } else {
        None
    }
}

/// Resolve the per-role sound asset: `assets/<name>` next to the executable,
/// then relative to the working directory.
pub fn resolve_asset(role: HookRole) -> Option<PathBuf> {
    let file = match role {
        HookRole::Notify => "notify.aiff",
        HookRole::Stop => "complete.aiff",
    };
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let path = dir.join("assets").join(file);
            if path.exists() {
                return Some(path);
            }
        }
    }
    let path = Path::new("assets").join(file);
    if path.exists() {
        return Some(path);
    }
    None
}

/// Stock system sound used when the bundled asset is missing (macOS only).
fn system_fallback(role: HookRole, platform: Platform) -> Option<PathBuf> {
    if platform != Platform::MacOs {
        return None;
    }
    let name = match role {
        HookRole::Notify => "Ping.aiff",
        HookRole::Stop => "Glass.aiff",
    };
    let path = Path::new("/System/Library/Sounds").join(name);
    path.exists().then_some(path)
}

/// Play the role's sound. Missing players or assets are recoverable: they
/// are logged and playback is skipped without error.
pub async fn play(role: HookRole, snap: &EnvironmentSnapshot) -> Result<()> {
    let Some(player) = select_player(&snap.sound_players) else {
        debug!("No sound player available, skipping playback");
        return Ok(());
    };

    let asset = match resolve_asset(role).or_else(|| system_fallback(role, snap.platform)) {
        Some(path) => path,
        None => {
            warn!(role = role.as_str(), "Sound asset not found, skipping playback");
            return Ok(());
        }
    };

    debug!(player, asset = %asset.display(), "Playing notification sound");
    let run = async {
        let output = Command::new(player)
            .arg(&asset)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to execute {player}"))?;
        if !output.status.success() {
            bail!("{player} exited with {}", output.status);
        }
        Ok(())
    };

    match tokio::time::timeout(SOUND_TIMEOUT, run).await {
        Ok(result) => result,
        Err(_) => bail!("sound playback timed out after {}s", SOUND_TIMEOUT.as_secs()),
    }
}
