//! Notification payload construction and input channel resolution
//!
//! A payload can arrive through several channels. Exactly one wins per
//! invocation, highest precedence first:
//!
//! 1. `CHN_TITLE` / `CHN_MESSAGE` (+ `CHN_LEVEL`) environment variables
//! 2. structured JSON on stdin (`title`, `message`, `level` fields)
//! 3. plain text on stdin (first line = title when multi-line)
//! 4. positional CLI arguments
//! 5. role-specific default payload
//!
//! All text is sanitized at construction: control characters outside
//! newline/tab are stripped and fields are capped at [`MAX_PAYLOAD_CHARS`]
//! before anything is interpolated into a shell command or script string.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hard cap on each payload field after sanitization.
pub const MAX_PAYLOAD_CHARS: usize = 1000;

/// Severity level carried alongside the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
}

impl Level {
    /// Lenient parse used for env vars / CLI args. Unknown values map to Info.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" | "err" | "critical" => Level::Error,
            "warning" | "warn" => Level::Warning,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which input channel produced the payload. Recorded in the debug log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    EnvVars,
    JsonStdin,
    PlainStdin,
    Args,
    Default,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::EnvVars => "env_vars",
            InputSource::JsonStdin => "json_stdin",
            InputSource::PlainStdin => "plain_stdin",
            InputSource::Args => "args",
            InputSource::Default => "default",
        }
    }
}

/// Positional arguments forwarded from the CLI.
#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    pub title: Option<String>,
    pub message: Option<String>,
    pub level: Option<String>,
}

impl InputArgs {
    fn has_content(&self) -> bool {
        self.title.is_some() || self.message.is_some()
    }
}

/// The notification content. Immutable after construction; both fields are
/// sanitized by [`NotificationPayload::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    pub level: Level,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, message: impl Into<String>, level: Level) -> Self {
        Self {
            title: sanitize(&title.into()),
            message: sanitize(&message.into()),
            level,
        }
    }

    /// Both fields blank after sanitization. Such payloads are discarded
    /// before classification.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.message.trim().is_empty()
    }
}

/// Strip raw control bytes (keeping newline and tab) and cap the length.
///
/// Idempotent, and never lengthens its input.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(MAX_PAYLOAD_CHARS)
        .collect()
}

/// Shape of structured stdin input. Extra fields (e.g. the assistant's
/// `hook_event_name`) are ignored rather than rejected.
#[derive(Debug, Deserialize)]
struct StructuredInput {
    title: Option<String>,
    message: Option<String>,
    level: Option<String>,
}

/// Resolve the payload from the available channels, in precedence order.
///
/// `stdin_text` is the content read once from a non-TTY stdin, if any.
/// `env_get` abstracts env var lookup so tests can inject a map.
pub fn resolve(
    args: &InputArgs,
    stdin_text: Option<&str>,
    default: NotificationPayload,
    env_get: &dyn Fn(&str) -> Option<String>,
) -> (NotificationPayload, InputSource) {
    if let Some(payload) = from_env_vars(env_get) {
        return (payload, InputSource::EnvVars);
    }
    if let Some(text) = stdin_text {
        match from_json(text) {
            Some(Some(payload)) => return (payload, InputSource::JsonStdin),
            // valid JSON without notification content (hook metadata like
            // session_id / hook_event_name); the source text must not leak
            // into the plain-text channel
            Some(None) => {
                debug!("Structured stdin carries no notification content, skipping stdin channel");
            }
            None => {
                if let Some(payload) = from_plain_text(text) {
                    return (payload, InputSource::PlainStdin);
                }
            }
        }
    }
    if args.has_content() {
        let level = args.level.as_deref().map(Level::parse).unwrap_or_default();
        let payload = NotificationPayload::new(
            args.title.clone().unwrap_or_default(),
            args.message.clone().unwrap_or_default(),
            level,
        );
        return (payload, InputSource::Args);
    }
    (default, InputSource::Default)
}

/// Read stdin once, but only when it is actually piped. Never blocks on an
/// interactive terminal.
pub fn read_stdin_once() -> Option<String> {
    use std::io::Read;

    if atty::is(atty::Stream::Stdin) {
        return None;
    }
    let mut buf = String::new();
    match std::io::stdin().read_to_string(&mut buf) {
        Ok(_) if !buf.trim().is_empty() => Some(buf),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Failed to read stdin, skipping channel");
            None
        }
    }
}

fn from_env_vars(env_get: &dyn Fn(&str) -> Option<String>) -> Option<NotificationPayload> {
    let title = env_get("CHN_TITLE");
    let message = env_get("CHN_MESSAGE");
    if title.is_none() && message.is_none() {
        return None;
    }
    let level = env_get("CHN_LEVEL")
        .map(|v| Level::parse(&v))
        .unwrap_or_default();
    Some(NotificationPayload::new(
        title.unwrap_or_default(),
        message.unwrap_or_default(),
        level,
    ))
}

/// Parse structured stdin. Outer `None` means the text is not structured
/// JSON at all; `Some(None)` means valid JSON that carries no notification
/// content, which consumes the stdin channel without producing a payload.
fn from_json(text: &str) -> Option<Option<NotificationPayload>> {
    let parsed: StructuredInput = match serde_json::from_str(text.trim()) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "stdin is not structured JSON, falling back to plain text");
            return None;
        }
    };
    if parsed.title.is_none() && parsed.message.is_none() {
        return Some(None);
    }
    let level = parsed
        .level
        .as_deref()
        .map(Level::parse)
        .unwrap_or_default();
    Some(Some(NotificationPayload::new(
        parsed.title.unwrap_or_default(),
        parsed.message.unwrap_or_default(),
        level,
    )))
}

fn from_plain_text(text: &str) -> Option<NotificationPayload> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let payload = match trimmed.split_once('\n') {
        Some((first, rest)) => {
            NotificationPayload::new(first.trim(), rest.trim(), Level::Info)
        }
        None => NotificationPayload::new("", trimmed, Level::Info),
    };
    Some(payload)
}
