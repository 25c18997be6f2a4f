//! termchat-engine: Headless conversation-input engine
//!
//! This crate provides the interaction model behind the termchat widget:
//! - Draft input buffer with auto-growing box sizing
//! - Submit-vs-newline keyboard policy
//! - Append-only message log with deferred autoscroll
//! - Reply state machine driving an asynchronous responder
//! - Markdown rendering and configuration

pub mod config;
pub mod controller;
pub mod input;
pub mod log;
pub mod markdown;
pub mod message;
pub mod policy;
pub mod responder;

// Re-export commonly used types
pub use config::{ChatConfig, ConfigError, FailurePolicy};
pub use controller::{
    CompletionError, ConversationController, KeyOutcome, PendingReply, ReplyOutcome, ReplyState,
    ReplyTicket, SubmitError, ViewState,
};
pub use input::{BoxSizing, InputBuffer};
pub use log::{AppendCause, AutoscrollPolicy, MessageLog, ScrollDecision, ScrollMetrics};
pub use markdown::{
    check_source, render_or_plain, HtmlRenderer, MarkdownRenderer, RenderError, Rendered,
};
pub use message::{Message, Role};
pub use policy::{decide, resolve, Decision, Key, KeyPress};
pub use responder::{PlaceholderResponder, ReplyFuture, Responder, ResponderError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
