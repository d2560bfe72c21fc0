//! SSH / CI detection predicates and external tool probing
//!
//! The predicates take an env lookup closure instead of touching
//! `std::env` directly so tests can inject a fixed map.

use tracing::debug;

use super::{NotifierTools, SoundTools};

/// CI indicator variables. Membership of any of these marks the process as
/// running under CI.
pub const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "TRAVIS",
    "CIRCLECI",
    "JENKINS_URL",
    "BUILDKITE",
    "DRONE",
    "TEAMCITY_VERSION",
    "APPVEYOR",
];

/// Read an env var, treating empty values as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// "1", "true", "yes", "on" (case-insensitive) count as enabled.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// SSH session heuristic: `SSH_CONNECTION` without a forwarded display,
/// or an SSH tty/client variable present.
pub fn is_ssh_session(env: &dyn Fn(&str) -> Option<String>) -> bool {
    (env("SSH_CONNECTION").is_some() && env("DISPLAY").is_none())
        || env("SSH_TTY").is_some()
        || env("SSH_CLIENT").is_some()
}

/// CI heuristic: any known indicator variable is set.
pub fn is_ci_environment(env: &dyn Fn(&str) -> Option<String>) -> bool {
    CI_ENV_VARS.iter().any(|name| env(name).is_some())
}

/// Does `name` resolve to an executable on PATH? Failures count as absent.
fn command_exists(name: &str) -> bool {
    match which::which(name) {
        Ok(path) => {
            debug!(command = name, path = %path.display(), "Found external tool");
            true
        }
        Err(_) => false,
    }
}

pub fn detect_notifier_tools() -> NotifierTools {
    NotifierTools {
        terminal_notifier: command_exists("terminal-notifier"),
        alerter: command_exists("alerter"),
        notify_send: command_exists("notify-send"),
        osascript: command_exists("osascript"),
    }
}

pub fn detect_sound_tools() -> SoundTools {
    SoundTools {
        afplay: command_exists("afplay"),
        paplay: command_exists("paplay"),
        aplay: command_exists("aplay"),
        play: command_exists("play"),
    }
}
