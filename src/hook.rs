//! Top-level hook flow: input -> classify -> style -> deliver -> sound
//!
//! One hook invocation is one process. The flow here is the only place the
//! pieces meet, and it owns the error policy: nothing below is allowed to
//! terminate the process uncaught.

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use crate::classify::{classify, style};
use crate::debug_log::DebugLog;
use crate::delivery::{self, DeliveryReport};
use crate::env_probe::{self, detect};
use crate::payload::{self, InputArgs, Level, NotificationPayload};
use crate::sound;

/// Which lifecycle event this invocation handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookRole {
    /// Generic "notification" event.
    Notify,
    /// "Session stop" event.
    Stop,
}

impl HookRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookRole::Notify => "notify",
            HookRole::Stop => "stop",
        }
    }

    /// Sentinel payload used when no input channel provided content.
    pub fn default_payload(&self) -> NotificationPayload {
        match self {
            HookRole::Notify => {
                NotificationPayload::new("Agent Notification", "Attention needed", Level::Info)
            }
            HookRole::Stop => NotificationPayload::new(
                "Session Complete",
                "The agent session has ended",
                Level::Info,
            ),
        }
    }
}

impl std::fmt::Display for HookRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Run one hook invocation end to end. Returns `None` when there was
/// nothing to deliver (empty payload), which is a normal exit.
pub async fn run(role: HookRole, args: InputArgs, debug_flag: bool) -> Result<Option<DeliveryReport>> {
    let debug_enabled = debug_flag
        || detect::env_var("CHN_DEBUG")
            .map(|v| detect::is_truthy(&v))
            .unwrap_or(false);
    let log = DebugLog::new(role, debug_enabled);

    let stdin_text = payload::read_stdin_once();
    let (payload, source) = payload::resolve(
        &args,
        stdin_text.as_deref(),
        role.default_payload(),
        &|name| detect::env_var(name),
    );
    log.record(
        "input",
        json!({
            "source": source.as_str(),
            "title": payload.title,
            "message_chars": payload.message.chars().count(),
            "level": payload.level.as_str(),
        }),
    );

    if payload.is_empty() {
        info!(role = %role, "Empty payload after sanitization, nothing to deliver");
        log.record("skip", json!({ "reason": "empty_payload" }));
        return Ok(None);
    }

    let category = classify(&payload.title, &payload.message);
    let styled = style(&payload, category);

    let snap = env_probe::probe();
    log.record(
        "environment",
        json!({
            "platform": snap.platform,
            "terminal_program": snap.terminal_program,
            "ssh": snap.is_ssh,
            "ci": snap.is_ci,
            "parent_app": snap.parent_app.name,
            "force_console": snap.force_console,
        }),
    );

    let report = delivery::deliver(&styled, snap).await;
    log.record(
        "delivery",
        json!({
            "method": report.method_used,
            "success": report.success,
            "category": category,
        }),
    );

    if report.success {
        // small gap so the sound lands with the banner, not before it
        tokio::time::sleep(sound::PLAYBACK_DELAY).await;
        if let Err(e) = sound::play(role, snap).await {
            warn!(error = %e, "Sound playback failed, notification still delivered");
            log.record("sound_error", json!({ "error": e.to_string() }));
        }
    }

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_payloads_are_non_empty() {
        assert!(!HookRole::Notify.default_payload().is_empty());
        assert!(!HookRole::Stop.default_payload().is_empty());
    }

    #[test]
    fn test_role_names() {
        assert_eq!(HookRole::Notify.as_str(), "notify");
        assert_eq!(HookRole::Stop.as_str(), "stop");
    }

    #[tokio::test]
    async fn test_empty_args_payload_skips_delivery() {
        // explicit input that sanitizes to nothing must not fall back to
        // the default payload, and must not deliver
        let args = InputArgs {
            title: Some("\u{7}\u{8}".to_string()),
            message: Some(" \u{1b} ".to_string()),
            level: None,
        };
        let outcome = run(HookRole::Notify, args, false).await.unwrap();
        assert!(outcome.is_none());
    }
}
