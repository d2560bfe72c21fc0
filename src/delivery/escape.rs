//! Terminal escape sequence notifications (OSC 9)
//!
//! iTerm2, WezTerm, kitty and Ghostty surface `ESC ] 9 ; text BEL` as a
//! desktop notification. Pure in-process write; no external binary.

use std::io::Write;

use anyhow::{Context, Result};

use crate::classify::StyledPayload;
use crate::env_probe::EnvironmentSnapshot;

/// Terminals known to honor OSC 9, matched on `TERM_PROGRAM` / `TERM`.
pub fn terminal_supports_osc(snap: &EnvironmentSnapshot) -> bool {
    if let Some(program) = snap.terminal_program.as_deref() {
        if matches!(program, "iTerm.app" | "WezTerm" | "ghostty") {
            return true;
        }
    }
    matches!(snap.term.as_deref(), Some("xterm-kitty"))
}

/// Emit the OSC 9 sequence on stdout. Payload text was sanitized upstream,
/// so it cannot carry a stray ESC or BEL that would break the sequence.
pub fn send_escape_sequence(payload: &StyledPayload) -> Result<()> {
    let text = if payload.title.is_empty() {
        payload.message.clone()
    } else if payload.message.is_empty() {
        payload.title.clone()
    } else {
        format!("{}: {}", payload.title, payload.message)
    };
    // OSC payloads are single-line
    let text = text.replace('\n', " ");

    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b]9;{}\x07", text).context("failed to write escape sequence")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env_probe::{NotifierTools, ParentApp, Platform, SoundTools};

    fn snapshot_with(program: Option<&str>, term: Option<&str>) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            platform: Platform::MacOs,
            terminal_program: program.map(str::to_string),
            term: term.map(str::to_string),
            color_term: None,
            no_color: false,
            is_ssh: false,
            is_ci: false,
            stdout_is_tty: Some(true),
            notifiers: NotifierTools::default(),
            sound_players: SoundTools::default(),
            parent_app: ParentApp::unknown(),
            force_console: false,
            debug: false,
        }
    }

    #[test]
    fn test_osc_support_matrix() {
        assert!(terminal_supports_osc(&snapshot_with(Some("iTerm.app"), None)));
        assert!(terminal_supports_osc(&snapshot_with(Some("WezTerm"), None)));
        assert!(terminal_supports_osc(&snapshot_with(Some("ghostty"), None)));
        assert!(terminal_supports_osc(&snapshot_with(None, Some("xterm-kitty"))));
        assert!(!terminal_supports_osc(&snapshot_with(
            Some("Apple_Terminal"),
            Some("xterm-256color")
        )));
        assert!(!terminal_supports_osc(&snapshot_with(None, None)));
    }
}
