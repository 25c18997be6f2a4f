//! Configuration types for the termchat widget.
//!
//! Every field has a serde default so partial JSON files load cleanly.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::log::AutoscrollPolicy;
use crate::responder::{PlaceholderResponder, PLACEHOLDER_REPLY};

/// Main configuration for termchat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Placeholder shown in the empty input box.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Optional assistant greeting appended when the widget starts.
    #[serde(default)]
    pub greeting: String,

    /// Prompt label shown before the input.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Handle used in author labels (`user@<handle>`).
    #[serde(default = "default_handle")]
    pub handle: String,

    /// Initial Enter-submits mode.
    #[serde(default)]
    pub enter_submits: bool,

    /// Near-bottom distance under which incoming replies autoscroll.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: u32,

    /// Delay before the placeholder responder answers, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Content the placeholder responder answers with.
    #[serde(default = "default_reply_content")]
    pub reply_content: String,

    /// What to do when the responder fails.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Event loop tick rate, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_placeholder() -> String {
    "Type a message...".into()
}

fn default_prompt() -> String {
    "user@jdev:~$".into()
}

fn default_handle() -> String {
    "agentj".into()
}

fn default_scroll_threshold() -> u32 {
    AutoscrollPolicy::default().threshold
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_reply_content() -> String {
    PLACEHOLDER_REPLY.into()
}

fn default_tick_rate_ms() -> u64 {
    250
}

/// Reaction to a failed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return to idle without appending anything.
    #[default]
    Silent,
    /// Append an assistant message describing the failure.
    Notice,
}

impl ChatConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Autoscroll policy derived from `scroll_threshold`.
    pub fn autoscroll(&self) -> AutoscrollPolicy {
        AutoscrollPolicy {
            threshold: self.scroll_threshold,
        }
    }

    /// Placeholder responder configured from `reply_delay_ms` and
    /// `reply_content`.
    pub fn placeholder_responder(&self) -> PlaceholderResponder {
        PlaceholderResponder::new(
            Duration::from_millis(self.reply_delay_ms),
            self.reply_content.clone(),
        )
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            greeting: String::new(),
            prompt: default_prompt(),
            handle: default_handle(),
            enter_submits: false,
            scroll_threshold: default_scroll_threshold(),
            reply_delay_ms: default_reply_delay_ms(),
            reply_content: default_reply_content(),
            failure_policy: FailurePolicy::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
