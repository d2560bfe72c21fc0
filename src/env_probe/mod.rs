//! Environment probing - platform, terminal, SSH/CI status, available tools
//!
//! [`probe`] computes an [`EnvironmentSnapshot`] once per process and caches
//! it for the process lifetime. Every sub-probe catches its own failures and
//! degrades to a neutral value; probing never errors out to the caller.

pub mod ancestry;
pub mod detect;

use once_cell::sync::Lazy;
use serde::Serialize;

pub use ancestry::ParentApp;

/// Host platform, folded down to what delivery selection cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }
}

/// Availability flags for external notifier executables.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NotifierTools {
    pub terminal_notifier: bool,
    pub alerter: bool,
    pub notify_send: bool,
    pub osascript: bool,
}

/// Availability flags for sound player executables.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SoundTools {
    pub afplay: bool,
    pub paplay: bool,
    pub aplay: bool,
    pub play: bool,
}

/// Immutable, process-lifetime record of the detected environment.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSnapshot {
    pub platform: Platform,
    pub terminal_program: Option<String>,
    pub term: Option<String>,
    pub color_term: Option<String>,
    pub no_color: bool,
    pub is_ssh: bool,
    pub is_ci: bool,
    /// Only an explicit `Some(false)` counts as non-interactive; `None`
    /// (unknown) must not be misclassified.
    pub stdout_is_tty: Option<bool>,
    pub notifiers: NotifierTools,
    pub sound_players: SoundTools,
    pub parent_app: ParentApp,
    pub force_console: bool,
    pub debug: bool,
}

impl EnvironmentSnapshot {
    /// Probe the live environment. Prefer [`probe`] which memoizes.
    pub fn detect() -> Self {
        let env = |name: &str| detect::env_var(name);
        Self {
            platform: Platform::current(),
            terminal_program: env("TERM_PROGRAM"),
            term: env("TERM"),
            color_term: env("COLORTERM"),
            no_color: env("NO_COLOR").is_some(),
            is_ssh: detect::is_ssh_session(&env),
            is_ci: detect::is_ci_environment(&env),
            stdout_is_tty: Some(atty::is(atty::Stream::Stdout)),
            notifiers: detect::detect_notifier_tools(),
            sound_players: detect::detect_sound_tools(),
            parent_app: ancestry::detect_parent_app(),
            force_console: env("CHN_FORCE_CONSOLE")
                .map(|v| detect::is_truthy(&v))
                .unwrap_or(false),
            debug: env("CHN_DEBUG").map(|v| detect::is_truthy(&v)).unwrap_or(false),
        }
    }

    /// Any of the SSH / CI / explicit non-TTY checks fired.
    pub fn is_non_interactive(&self) -> bool {
        self.is_ssh || self.is_ci || self.stdout_is_tty == Some(false)
    }
}

static SNAPSHOT: Lazy<EnvironmentSnapshot> = Lazy::new(EnvironmentSnapshot::detect);

/// Memoized environment snapshot, computed once per process.
pub fn probe() -> &'static EnvironmentSnapshot {
    &SNAPSHOT
}
