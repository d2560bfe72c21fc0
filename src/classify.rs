//! Content classification and emoji styling
//!
//! Maps the free-form (title, message) text to one semantic category via
//! ordered pattern matching. The check order is part of the contract:
//! domain categories (git, build, test, deploy, package, file) are tested
//! before the generic ones (error, warning, success, progress), and the
//! five process categories get an error/success override applied on top.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::payload::{Level, NotificationPayload};

/// Styled message length cap (ellipsis appended past this).
pub const MAX_STYLED_MESSAGE_CHARS: usize = 200;

/// Semantic bucket assigned to a notification's text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Success,
    Error,
    Warning,
    Info,
    Progress,
    Git,
    Build,
    Test,
    Deploy,
    Package,
    FileOp,
}

impl Category {
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Success => "✅",
            Category::Error => "❌",
            Category::Warning => "⚠️",
            Category::Info => "ℹ️",
            Category::Progress => "🔄",
            Category::Git => "🔀",
            Category::Build => "🔨",
            Category::Test => "🧪",
            Category::Deploy => "🚀",
            Category::Package => "📦",
            Category::FileOp => "📁",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Info => "info",
            Category::Progress => "progress",
            Category::Git => "git",
            Category::Build => "build",
            Category::Test => "test",
            Category::Deploy => "deploy",
            Category::Package => "package",
            Category::FileOp => "file_op",
        }
    }

    /// Process categories get the error/success override in [`classify`].
    fn is_process_category(&self) -> bool {
        matches!(
            self,
            Category::Git
                | Category::Build
                | Category::Test
                | Category::Deploy
                | Category::Package
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static classifier pattern must compile"))
        .collect()
}

/// Ordered category checks. Earlier entries win when several match.
static CATEGORY_PATTERNS: Lazy<Vec<(Category, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            Category::Git,
            compile(&[
                r"\bgit\b", r"\bcommit", r"\bpush", r"\bpull\b", r"\bmerge",
                r"\brebase", r"\bbranch", r"\bcheckout", r"repositor",
            ]),
        ),
        (
            Category::Build,
            compile(&[r"\bbuild", r"compil", r"\bbundl", r"webpack", r"transpil"]),
        ),
        (
            Category::Test,
            compile(&[r"\btests?\b", r"\btesting\b", r"\bspec\b", r"\bjest\b", r"\bpytest\b", r"assert"]),
        ),
        (
            Category::Deploy,
            compile(&[r"deploy", r"\brelease", r"\bpublish", r"\bship"]),
        ),
        (
            Category::Package,
            compile(&[r"\bnpm\b", r"\byarn\b", r"\bpnpm\b", r"\bcargo\b", r"\bpackage", r"dependenc", r"\binstall"]),
        ),
        (
            Category::FileOp,
            compile(&[r"\bfiles?\b", r"director", r"\bfolder", r"\brenamed?\b", r"\bmoved\b"]),
        ),
        (
            Category::Error,
            compile(&[r"\berror", r"\bfail", r"exception", r"\bfatal\b", r"denied", r"\bcannot\b", r"\bunable\b", r"\bcrash"]),
        ),
        (
            Category::Warning,
            compile(&[r"\bwarn", r"deprecat", r"\bcaution\b"]),
        ),
        (
            Category::Success,
            compile(&[r"success", r"\bcomplete", r"\bdone\b", r"\bfinish", r"\bpassed\b", r"✓"]),
        ),
        (
            Category::Progress,
            compile(&[r"\bprogress\b", r"\brunning\b", r"processing", r"\bloading\b", r"\bstarting\b"]),
        ),
    ]
});

/// Patterns that flip a process category to Error.
static ERROR_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\berror", r"\bfail", r"denied", r"\bfatal\b", r"exception",
        r"\bcannot\b", r"\bunable\b", r"conflict", r"reject",
    ])
});

/// Patterns that flip a process category to Success.
static SUCCESS_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"success", r"\bcomplete", r"\bpassed\b", r"\bdone\b", r"\bfinish",
        r"up to date", r"\bmerged\b",
    ])
});

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

/// Classify a (title, message) pair. Pure function; no match means Info.
pub fn classify(title: &str, message: &str) -> Category {
    let text = format!("{} {}", title, message).to_lowercase();

    for (category, patterns) in CATEGORY_PATTERNS.iter() {
        if !any_match(patterns, &text) {
            continue;
        }
        if category.is_process_category() {
            if any_match(&ERROR_INDICATORS, &text) {
                return Category::Error;
            }
            if any_match(&SUCCESS_INDICATORS, &text) {
                return Category::Success;
            }
        }
        return *category;
    }
    Category::Info
}

/// Payload after classification and emoji styling, ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct StyledPayload {
    pub title: String,
    pub message: String,
    pub level: Level,
    pub category: Category,
}

/// Prepend the category emoji to the title (unless one is already present)
/// and truncate the message for display.
pub fn style(payload: &NotificationPayload, category: Category) -> StyledPayload {
    let title = if contains_emoji(&payload.title) {
        payload.title.clone()
    } else {
        format!("{} {}", category.emoji(), payload.title)
            .trim_end()
            .to_string()
    };
    StyledPayload {
        title,
        message: truncate_chars(&payload.message, MAX_STYLED_MESSAGE_CHARS),
        level: payload.level,
        category,
    }
}

/// Emoji-range check covering the glyphs this crate emits plus the common
/// pictographic blocks.
pub fn contains_emoji(s: &str) -> bool {
    s.chars().any(|c| {
        let cp = c as u32;
        (0x1F300..=0x1FAFF).contains(&cp)
            || (0x2600..=0x27BF).contains(&cp)
            || (0x1F000..=0x1F0FF).contains(&cp)
            || cp == 0x2139 // ℹ
            || cp == 0x2B50 // ⭐
    })
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_success_override() {
        assert_eq!(
            classify("Build Complete", "Compilation successful"),
            Category::Success
        );
    }

    #[test]
    fn test_test_success_override() {
        assert_eq!(
            classify("Tests Passed", "All 25 tests completed successfully!"),
            Category::Success
        );
    }

    #[test]
    fn test_git_error_override() {
        assert_eq!(
            classify("Git Push Failed", "Permission denied to repository"),
            Category::Error
        );
    }

    #[test]
    fn test_no_match_is_info() {
        assert_eq!(classify("Hello", "World"), Category::Info);
    }

    #[test]
    fn test_plain_process_category_survives() {
        assert_eq!(classify("Git", "switched branch"), Category::Git);
        assert_eq!(classify("Deploying", "to staging"), Category::Deploy);
    }

    #[test]
    fn test_generic_error_without_process_context() {
        assert_eq!(classify("Oops", "an unexpected error occurred"), Category::Error);
    }

    #[test]
    fn test_warning() {
        assert_eq!(classify("Heads up", "deprecated API in use"), Category::Warning);
    }

    #[test]
    fn test_order_domain_before_generic() {
        // "npm install failed" hits Package first, then flips to Error via
        // the override rather than via the generic error category.
        assert_eq!(classify("npm install", "install failed"), Category::Error);
    }

    #[test]
    fn test_style_prepends_exactly_one_emoji() {
        let payload = NotificationPayload::new("Build Complete", "ok", Level::Info);
        let styled = style(&payload, Category::Success);
        assert!(styled.title.starts_with("✅ "));
        // only the leading glyph is an emoji
        assert_eq!(
            styled.title.chars().filter(|c| contains_emoji(&c.to_string())).count(),
            1
        );
    }

    #[test]
    fn test_style_keeps_existing_emoji() {
        let payload = NotificationPayload::new("🎉 Done", "ok", Level::Info);
        let styled = style(&payload, Category::Success);
        assert_eq!(styled.title, "🎉 Done");
    }

    #[test]
    fn test_style_truncates_message() {
        let payload = NotificationPayload::new("T", "x".repeat(500), Level::Info);
        let styled = style(&payload, Category::Info);
        assert_eq!(styled.message.chars().count(), MAX_STYLED_MESSAGE_CHARS);
        assert!(styled.message.ends_with('…'));
    }

    #[test]
    fn test_style_with_empty_title_is_just_emoji() {
        let payload = NotificationPayload::new("", "something happened", Level::Info);
        let styled = style(&payload, Category::Info);
        assert_eq!(styled.title, "ℹ️");
    }

    #[test]
    fn test_category_emoji_total() {
        // every category maps to a non-empty glyph
        let all = [
            Category::Success, Category::Error, Category::Warning, Category::Info,
            Category::Progress, Category::Git, Category::Build, Category::Test,
            Category::Deploy, Category::Package, Category::FileOp,
        ];
        for c in all {
            assert!(!c.emoji().is_empty());
            assert!(contains_emoji(c.emoji()), "emoji for {c} not in range");
        }
    }
}
