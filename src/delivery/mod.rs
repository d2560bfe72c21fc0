//! Delivery method selection and dispatch
//!
//! A delivery method is one concrete mechanism for showing the notification.
//! Candidates are ranked, filtered by availability against the environment
//! snapshot, and attempted strictly in order; the plain console fallback has
//! no external dependency and anchors the chain.

pub mod console;
pub mod escape;
pub mod notifier;
pub mod osascript;

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::StyledPayload;
use crate::env_probe::{EnvironmentSnapshot, Platform};

/// Per-attempt timeout for visual notification dispatch.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// One concrete way of presenting a notification, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// `terminal-notifier` popup with click-to-focus support (macOS).
    InteractiveNotifier,
    /// Standalone notifier binary: `notify-send` (Linux) or `alerter`.
    ExternalNotifierTool,
    /// `osascript` `display notification` banner (macOS).
    SystemScript,
    /// OSC 9 terminal escape sequence (iTerm2, WezTerm, kitty, Ghostty).
    TerminalEscape,
    /// Plain text on stdout. Always available, cannot fail.
    ConsoleText,
}

impl DeliveryMethod {
    pub fn name(&self) -> &'static str {
        match self {
            DeliveryMethod::InteractiveNotifier => "interactive_notifier",
            DeliveryMethod::ExternalNotifierTool => "external_tool",
            DeliveryMethod::SystemScript => "system_script",
            DeliveryMethod::TerminalEscape => "terminal_escape",
            DeliveryMethod::ConsoleText => "console",
        }
    }

    pub fn is_available(&self, snap: &EnvironmentSnapshot) -> bool {
        match self {
            DeliveryMethod::InteractiveNotifier => {
                snap.platform == Platform::MacOs && snap.notifiers.terminal_notifier
            }
            DeliveryMethod::ExternalNotifierTool => {
                snap.notifiers.notify_send || snap.notifiers.alerter
            }
            DeliveryMethod::SystemScript => {
                snap.platform == Platform::MacOs && snap.notifiers.osascript
            }
            DeliveryMethod::TerminalEscape => escape::terminal_supports_osc(snap),
            DeliveryMethod::ConsoleText => true,
        }
    }

    /// One delivery attempt. Errors are non-fatal; the dispatcher moves on
    /// to the next candidate.
    pub async fn attempt(
        &self,
        payload: &StyledPayload,
        snap: &EnvironmentSnapshot,
    ) -> anyhow::Result<()> {
        match self {
            DeliveryMethod::InteractiveNotifier => {
                notifier::send_terminal_notifier(payload, snap).await
            }
            DeliveryMethod::ExternalNotifierTool => {
                notifier::send_external_tool(payload, snap).await
            }
            DeliveryMethod::SystemScript => osascript::send_osascript(payload).await,
            DeliveryMethod::TerminalEscape => escape::send_escape_sequence(payload),
            DeliveryMethod::ConsoleText => {
                console::print_console(payload);
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build the priority-ordered candidate list for this environment.
///
/// The force-console override short-circuits before any other heuristic,
/// then non-interactive environments (SSH, CI, explicit non-TTY) collapse to
/// console regardless of which tools are installed.
pub fn candidate_chain(snap: &EnvironmentSnapshot) -> Vec<DeliveryMethod> {
    if snap.force_console || snap.is_non_interactive() {
        return vec![DeliveryMethod::ConsoleText];
    }

    let ranked = [
        DeliveryMethod::InteractiveNotifier,
        DeliveryMethod::ExternalNotifierTool,
        DeliveryMethod::SystemScript,
        DeliveryMethod::TerminalEscape,
    ];
    let mut chain: Vec<DeliveryMethod> = ranked
        .into_iter()
        .filter(|m| m.is_available(snap))
        .collect();
    chain.push(DeliveryMethod::ConsoleText);
    chain
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub success: bool,
    pub method_used: DeliveryMethod,
}

/// Attempt candidates in priority order until one succeeds. Each attempt is
/// bounded by [`NOTIFY_TIMEOUT`]; failures are logged and skipped. The
/// console anchor guarantees termination with success.
pub async fn deliver(payload: &StyledPayload, snap: &EnvironmentSnapshot) -> DeliveryReport {
    for method in candidate_chain(snap) {
        match tokio::time::timeout(NOTIFY_TIMEOUT, method.attempt(payload, snap)).await {
            Ok(Ok(())) => {
                info!(method = %method, category = %payload.category, "Notification delivered");
                return DeliveryReport {
                    success: true,
                    method_used: method,
                };
            }
            Ok(Err(e)) => {
                warn!(method = %method, error = %e, "Delivery attempt failed, trying next method");
            }
            Err(_) => {
                warn!(method = %method, timeout_secs = NOTIFY_TIMEOUT.as_secs(), "Delivery attempt timed out, trying next method");
            }
        }
    }

    // console cannot fail, so the loop above always returns; this is the
    // report of last resort if that invariant is ever broken
    DeliveryReport {
        success: false,
        method_used: DeliveryMethod::ConsoleText,
    }
}
