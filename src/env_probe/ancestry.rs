//! Parent application detection via the process ancestry
//!
//! Walks parent-process links from the current pid up to a bounded depth,
//! looking for a recognizable desktop application (a `.app/` bundle path on
//! macOS, or a known terminal/editor process name). Any OS-level failure
//! along the way degrades to the unknown-application sentinel.

use serde::Serialize;
use sysinfo::System;
use tracing::debug;

/// Ancestry walk depth bound. Process ancestry is acyclic and short; 15
/// levels is more than enough to reach the terminal emulator.
pub const MAX_ANCESTRY_DEPTH: usize = 15;

/// The desktop application presumed to host this hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ParentApp {
    pub name: String,
    pub bundle_id: Option<String>,
}

impl ParentApp {
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            bundle_id: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.name != "Unknown"
    }
}

/// Known applications: (display name, bundle identifier). Used both to
/// resolve a bundle path to a stable identifier and to match bare process
/// names on platforms without app bundles.
const KNOWN_APPS: &[(&str, &str)] = &[
    ("Terminal", "com.apple.Terminal"),
    ("iTerm2", "com.googlecode.iterm2"),
    ("iTerm", "com.googlecode.iterm2"),
    ("WezTerm", "com.github.wez.wezterm"),
    ("Alacritty", "org.alacritty"),
    ("kitty", "net.kovidgoyal.kitty"),
    ("Ghostty", "com.mitchellh.ghostty"),
    ("Warp", "dev.warp.Warp-Stable"),
    ("Hyper", "co.zeit.hyper"),
    ("Visual Studio Code", "com.microsoft.VSCode"),
    ("Code", "com.microsoft.VSCode"),
    ("Cursor", "com.todesktop.230313mzl4w4u92"),
    ("Zed", "dev.zed.Zed"),
];

/// Detect the parent application, falling back to the unknown sentinel on
/// any failure. Never errors.
pub fn detect_parent_app() -> ParentApp {
    match try_detect_parent_app() {
        Some(app) => {
            debug!(app = %app.name, bundle_id = ?app.bundle_id, "Detected parent application");
            app
        }
        None => ParentApp::unknown(),
    }
}

fn try_detect_parent_app() -> Option<ParentApp> {
    let system = System::new_all();
    let mut pid = sysinfo::get_current_pid().ok()?;

    for _ in 0..MAX_ANCESTRY_DEPTH {
        let process = system.process(pid)?;
        let parent_pid = process.parent()?;
        let parent = system.process(parent_pid)?;

        let name = parent.name().to_string_lossy().to_string();
        let cmd = parent
            .cmd()
            .iter()
            .map(|s| s.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(app) = match_known_app(&name, &cmd) {
            return Some(app);
        }
        pid = parent_pid;
    }
    None
}

fn match_known_app(process_name: &str, cmd: &str) -> Option<ParentApp> {
    // bundle marker wins: extract the app name from ".../Name.app/..."
    if let Some(app_name) = extract_bundle_name(cmd) {
        let bundle_id = lookup_bundle_id(&app_name);
        return Some(ParentApp {
            name: app_name,
            bundle_id,
        });
    }

    // bare process name match (Linux terminals, stripped binaries)
    let lower = process_name.to_lowercase();
    KNOWN_APPS
        .iter()
        .find(|(name, _)| lower == name.to_lowercase())
        .map(|(name, id)| ParentApp {
            name: name.to_string(),
            bundle_id: Some(id.to_string()),
        })
}

fn lookup_bundle_id(app_name: &str) -> Option<String> {
    KNOWN_APPS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(app_name))
        .map(|(_, id)| id.to_string())
}

/// Pull the application name out of an argument string containing a macOS
/// bundle path, e.g. `/Applications/iTerm2.app/Contents/MacOS/iTerm2`.
fn extract_bundle_name(cmd: &str) -> Option<String> {
    let idx = cmd.find(".app/")?;
    let head = &cmd[..idx];
    let start = head.rfind('/').map(|i| i + 1).unwrap_or(0);
    let name = head[start..].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
