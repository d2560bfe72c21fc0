//! Append-only debug log, gated behind the debug flag
//!
//! Newline-delimited JSON records per hook role. Absent the flag, no log
//! I/O happens at all. Writes are best-effort: a failed append is reported
//! at debug level and otherwise ignored.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::hook::HookRole;

#[derive(Debug, Serialize)]
struct DebugRecord<'a> {
    ts: DateTime<Utc>,
    role: &'a str,
    stage: &'a str,
    detail: serde_json::Value,
}

/// Per-role debug log writer. Opened and closed per write; first write
/// creates the log directory.
pub struct DebugLog {
    enabled: bool,
    role: HookRole,
}

impl DebugLog {
    pub fn new(role: HookRole, enabled: bool) -> Self {
        Self { enabled, role }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log file path for a role.
    pub fn path(role: HookRole) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("code-hook-notify")
            .join("logs")
            .join(format!("{}.jsonl", role.as_str()))
    }

    /// Append one record. No-op unless debug mode is on; never fails the
    /// caller.
    pub fn record(&self, stage: &str, detail: serde_json::Value) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.append(stage, detail) {
            debug!(error = %e, stage, "Debug log append failed");
        }
    }

    fn append(&self, stage: &str, detail: serde_json::Value) -> Result<()> {
        let record = DebugRecord {
            ts: Utc::now(),
            role: self.role.as_str(),
            stage,
            detail,
        };
        append_at(&Self::path(self.role), &record)
    }
}

/// Append one record to `path` under an exclusive file lock, creating the
/// parent directory on first write.
fn append_at(path: &std::path::Path, record: &DebugRecord<'_>) -> Result<()> {
    use fs2::FileExt;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;
    let mut file = file;
    writeln!(file, "{}", serde_json::to_string(record)?)?;
    file.unlock()?;
    Ok(())
}
