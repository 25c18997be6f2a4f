//! Append-only message log with deferred autoscroll.
//!
//! Every append bumps the log [`version`](MessageLog::version) and records a
//! pending scroll request. The request is only resolved once the consumer
//! has laid out the new message list and calls
//! [`settle_layout`](MessageLog::settle_layout) with post-layout metrics.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::message::Message;

/// Why a message was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendCause {
    /// The local user submitted the message. Always scrolls into view.
    LocalSubmit,
    /// A reply (or greeting) arrived. Scrolls only when near the bottom.
    IncomingReply,
}

impl AppendCause {
    fn forced(self) -> bool {
        matches!(self, AppendCause::LocalSubmit)
    }
}

/// Scroll geometry of the log viewport, measured after layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Total height of the laid-out content.
    pub scroll_height: u32,
    /// Offset of the viewport's top edge into the content.
    pub scroll_top: u32,
    /// Height of the visible viewport.
    pub viewport_height: u32,
}

impl ScrollMetrics {
    /// Distance between the bottom of the viewport and the end of content.
    pub fn distance_from_bottom(&self) -> u32 {
        self.scroll_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.viewport_height)
    }

    /// Scroll offset that shows the end of the content.
    pub fn bottom_offset(&self) -> u32 {
        self.scroll_height.saturating_sub(self.viewport_height)
    }
}

/// Near-bottom heuristic for non-forced appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscrollPolicy {
    /// Appends scroll when the viewport is strictly closer than this to
    /// the bottom.
    pub threshold: u32,
}

impl AutoscrollPolicy {
    /// Decide whether to jump to the bottom.
    pub fn should_scroll(&self, forced: bool, metrics: &ScrollMetrics) -> bool {
        forced || metrics.distance_from_bottom() < self.threshold
    }
}

impl Default for AutoscrollPolicy {
    fn default() -> Self {
        Self { threshold: 100 }
    }
}

/// Outcome of settling a pending scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    /// Leave the viewport where it is.
    Stay,
    /// Jump to the given offset (the bottom of the content).
    JumpTo(u32),
}

/// Ordered, append-only conversation log.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    version: u64,
    /// `Some(forced)` while an append is waiting for a layout pass.
    pending_scroll: Option<bool>,
    policy: AutoscrollPolicy,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new(policy: AutoscrollPolicy) -> Self {
        Self {
            messages: Vec::new(),
            version: 0,
            pending_scroll: None,
            policy,
        }
    }

    /// All messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Version counter, bumped on every append.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Autoscroll policy in effect.
    pub fn policy(&self) -> AutoscrollPolicy {
        self.policy
    }

    /// Append a message and schedule a scroll evaluation. Returns the new
    /// version.
    pub fn append(&mut self, message: Message, cause: AppendCause) -> u64 {
        self.messages.push(message);
        self.version += 1;

        // Several appends before a layout pass collapse into one request,
        // forced if any of them was.
        let forced = cause.forced() || self.pending_scroll.unwrap_or(false);
        self.pending_scroll = Some(forced);

        trace!(version = self.version, forced, "message appended");
        self.version
    }

    /// Whether an append is waiting for a layout pass.
    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }

    /// Resolve the pending scroll request against post-layout metrics.
    ///
    /// Returns `None` when no append happened since the last settle.
    pub fn settle_layout(&mut self, metrics: ScrollMetrics) -> Option<ScrollDecision> {
        let forced = self.pending_scroll.take()?;
        let decision = if self.policy.should_scroll(forced, &metrics) {
            ScrollDecision::JumpTo(metrics.bottom_offset())
        } else {
            ScrollDecision::Stay
        };
        trace!(?decision, ?metrics, forced, "scroll settled");
        Some(decision)
    }
}
