//! Reply responders.
//!
//! A [`Responder`] turns the submitted conversation text into assistant
//! reply content, asynchronously. The controller never awaits it itself;
//! it hands the future to the caller, who resolves it on its event loop.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future returned by [`Responder::respond`].
pub type ReplyFuture = Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send>>;

/// Produces assistant replies.
pub trait Responder: Send + Sync {
    /// Start producing a reply for the given conversation text.
    fn respond(&self, conversation_text: &str) -> ReplyFuture;
}

/// Errors reported by a responder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponderError {
    /// The responder rejected the request.
    #[error("responder failed: {0}")]
    Failed(String),

    /// The task running the responder went away before finishing.
    #[error("reply task aborted: {0}")]
    Aborted(String),
}

/// Default reply content of the placeholder responder.
pub const PLACEHOLDER_REPLY: &str =
    "(This is a **placeholder** response. AI implementation will go here.)";

/// Default delay of the placeholder responder.
pub const PLACEHOLDER_DELAY: Duration = Duration::from_millis(1000);

/// Stand-in responder: waits, then returns fixed content.
#[derive(Debug, Clone)]
pub struct PlaceholderResponder {
    delay: Duration,
    content: String,
}

impl PlaceholderResponder {
    /// Create a placeholder responder.
    pub fn new(delay: Duration, content: impl Into<String>) -> Self {
        Self {
            delay,
            content: content.into(),
        }
    }
}

impl Default for PlaceholderResponder {
    fn default() -> Self {
        Self::new(PLACEHOLDER_DELAY, PLACEHOLDER_REPLY)
    }
}

impl Responder for PlaceholderResponder {
    fn respond(&self, _conversation_text: &str) -> ReplyFuture {
        let delay = self.delay;
        let content = self.content.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(content)
        })
    }
}
