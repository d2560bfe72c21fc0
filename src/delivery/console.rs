//! Plain console text output - the guaranteed delivery anchor

use std::io::Write;

use crate::classify::StyledPayload;

/// Format the payload for a single console line pair.
pub fn format_console(payload: &StyledPayload) -> String {
    if payload.message.is_empty() {
        payload.title.clone()
    } else if payload.title.is_empty() {
        payload.message.clone()
    } else {
        format!("{}: {}", payload.title, payload.message)
    }
}

/// Write the notification to stdout. Write errors (closed pipe) are
/// swallowed; this method must never fail.
pub fn print_console(payload: &StyledPayload) {
    let mut stdout = std::io::stdout();
    let _ = writeln!(stdout, "{}", format_console(payload));
    let _ = stdout.flush();
}

/// Last-resort line used by the top-level error handler. Returns whether
/// the write itself succeeded, which decides the process exit code.
pub fn emergency(text: &str) -> bool {
    let mut stderr = std::io::stderr();
    writeln!(stderr, "{}", text).is_ok()
}
