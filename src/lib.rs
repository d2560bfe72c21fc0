//! code-hook-notify - desktop notifications for coding-agent hook events
//!
//! The crate turns a hook invocation (generic notification or session stop)
//! into a styled desktop notification: classify the text, pick an emoji,
//! probe the environment once, then walk a priority-ordered chain of
//! delivery mechanisms that bottoms out in plain console output.

pub mod classify;
pub mod debug_log;
pub mod delivery;
pub mod env_probe;
pub mod hook;
pub mod payload;
pub mod sound;

pub use classify::{classify, contains_emoji, style, Category, StyledPayload};
pub use debug_log::DebugLog;
pub use delivery::{candidate_chain, deliver, DeliveryMethod, DeliveryReport};
pub use env_probe::{
    probe, EnvironmentSnapshot, NotifierTools, ParentApp, Platform, SoundTools,
};
pub use hook::HookRole;
pub use payload::{sanitize, InputArgs, InputSource, Level, NotificationPayload};
