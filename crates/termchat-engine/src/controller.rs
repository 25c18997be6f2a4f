//! Conversation-input controller.
//!
//! [`ConversationController`] owns the draft, the message log and the
//! reply state machine:
//!
//! ```text
//! Idle --submit--> AwaitingReply --complete_reply--> Idle
//! ```
//!
//! `submit` does not await the responder. It returns a [`PendingReply`]
//! holding the responder future; the caller drives that future on its own
//! event loop and feeds the result back through
//! [`complete_reply`](ConversationController::complete_reply).

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ChatConfig, FailurePolicy};
use crate::input::{BoxSizing, InputBuffer};
use crate::log::{AppendCause, MessageLog, ScrollDecision, ScrollMetrics};
use crate::message::Message;
use crate::policy::{self, Decision, KeyPress};
use crate::responder::{ReplyFuture, Responder, ResponderError};

/// Reply state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    /// No reply outstanding; submissions accepted.
    Idle,
    /// A reply is outstanding for the given ticket.
    AwaitingReply(ReplyTicket),
}

/// Identifies one submission's outstanding reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket(u64);

/// Errors returned by [`ConversationController::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The text is empty or whitespace only.
    #[error("nothing to submit")]
    EmptyInput,

    /// A reply is still outstanding.
    #[error("a reply is already pending")]
    Busy,
}

/// Errors returned by [`ConversationController::complete_reply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The ticket does not match the outstanding reply.
    #[error("no pending reply for ticket {0:?}")]
    UnexpectedReply(ReplyTicket),
}

/// A submitted message waiting for its reply.
pub struct PendingReply {
    /// Ticket to pass back to `complete_reply`.
    pub ticket: ReplyTicket,
    /// The responder's in-flight future.
    pub future: ReplyFuture,
}

impl std::fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReply")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// How a settled reply changed the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The assistant message was appended.
    Appended,
    /// The responder failed; a notice was appended.
    FailedWithNotice(ResponderError),
    /// The responder failed; nothing was appended.
    FailedSilently(ResponderError),
}

/// Result of routing a key press through the controller.
#[derive(Debug)]
pub enum KeyOutcome {
    /// The draft was submitted.
    Submitted(PendingReply),
    /// The presentation layer should insert a newline.
    Newline,
    /// Default key handling applies (Enter never inserts text here).
    Ignored,
}

/// What the presentation layer needs to draw.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub messages: &'a [Message],
    pub log_version: u64,
    pub loading: bool,
    pub draft: &'a str,
    pub box_height: u32,
    pub enter_submits: bool,
    pub can_send: bool,
}

/// Owns the draft, message log, and reply state for one widget instance.
pub struct ConversationController {
    input: InputBuffer,
    log: MessageLog,
    state: ReplyState,
    responder: Arc<dyn Responder>,
    failure_policy: FailurePolicy,
    next_ticket: u64,
}

impl ConversationController {
    /// Create a controller with default settings.
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self::with_config(responder, &ChatConfig::default(), BoxSizing::default())
    }

    /// Create a controller from configuration.
    ///
    /// A non-empty greeting is appended as the first assistant message.
    pub fn with_config(
        responder: Arc<dyn Responder>,
        config: &ChatConfig,
        sizing: BoxSizing,
    ) -> Self {
        let mut input = InputBuffer::new(sizing);
        input.set_enter_submits(config.enter_submits);

        let mut log = MessageLog::new(config.autoscroll());
        if !config.greeting.is_empty() {
            log.append(
                Message::assistant(config.greeting.clone()),
                AppendCause::IncomingReply,
            );
        }

        Self {
            input,
            log,
            state: ReplyState::Idle,
            responder,
            failure_policy: config.failure_policy,
            next_ticket: 1,
        }
    }

    /// Set the failure policy.
    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The draft input buffer.
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// The message log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Current reply state.
    pub fn state(&self) -> ReplyState {
        self.state
    }

    /// Whether a reply is outstanding.
    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.state, ReplyState::AwaitingReply(_))
    }

    /// Whether the send affordance should be enabled.
    pub fn can_send(&self) -> bool {
        self.input.is_submittable()
    }

    /// Replace the draft text. `measured_height` is the content height the
    /// presentation layer measured for it.
    pub fn set_text(&mut self, text: impl Into<String>, measured_height: u32) {
        self.input.set_text(text, measured_height);
    }

    /// Flip Enter-submits mode. Returns the new value.
    pub fn toggle_enter_submits(&mut self) -> bool {
        let enabled = self.input.toggle_enter_submits();
        debug!(enabled, "enter-submits toggled");
        enabled
    }

    /// Route a key press through the submission policy.
    ///
    /// A submit that cannot go through is downgraded to
    /// [`KeyOutcome::Ignored`].
    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        let decision = policy::resolve(
            policy::decide(press, self.input.enter_submits()),
            self.input.is_submittable(),
        );
        match decision {
            Decision::Submit => match self.submit_draft() {
                Ok(pending) => KeyOutcome::Submitted(pending),
                Err(_) => KeyOutcome::Ignored,
            },
            Decision::Newline => KeyOutcome::Newline,
            Decision::Ignore => KeyOutcome::Ignored,
        }
    }

    /// Submit the current draft.
    pub fn submit_draft(&mut self) -> Result<PendingReply, SubmitError> {
        let text = self.input.draft().to_string();
        self.submit(&text)
    }

    /// Submit `text` as a user message and start the responder.
    ///
    /// On success the user message is appended (forced scroll), the draft
    /// is cleared, and the controller waits for the reply.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.is_awaiting_reply() {
            return Err(SubmitError::Busy);
        }

        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;

        self.log
            .append(Message::user(text), AppendCause::LocalSubmit);
        self.input.clear();
        self.input.set_awaiting_reply(true);
        self.state = ReplyState::AwaitingReply(ticket);
        debug!(?ticket, len = text.len(), "message submitted");

        let future = self.responder.respond(text);
        Ok(PendingReply { ticket, future })
    }

    /// Feed a finished responder result back in.
    pub fn complete_reply(
        &mut self,
        ticket: ReplyTicket,
        result: Result<String, ResponderError>,
    ) -> Result<ReplyOutcome, CompletionError> {
        if self.state != ReplyState::AwaitingReply(ticket) {
            return Err(CompletionError::UnexpectedReply(ticket));
        }

        self.state = ReplyState::Idle;
        self.input.set_awaiting_reply(false);

        let outcome = match result {
            Ok(content) => {
                debug!(?ticket, len = content.len(), "reply received");
                self.log
                    .append(Message::assistant(content), AppendCause::IncomingReply);
                ReplyOutcome::Appended
            }
            Err(e) => {
                warn!(?ticket, error = %e, "responder failed");
                match self.failure_policy {
                    FailurePolicy::Silent => ReplyOutcome::FailedSilently(e),
                    FailurePolicy::Notice => {
                        self.log.append(
                            Message::assistant(format!("Error: {e}")),
                            AppendCause::IncomingReply,
                        );
                        ReplyOutcome::FailedWithNotice(e)
                    }
                }
            }
        };
        Ok(outcome)
    }

    /// Resolve any pending autoscroll against post-layout metrics.
    pub fn settle_layout(&mut self, metrics: ScrollMetrics) -> Option<ScrollDecision> {
        self.log.settle_layout(metrics)
    }

    /// Snapshot of everything the presentation layer draws.
    pub fn view(&self) -> ViewState<'_> {
        ViewState {
            messages: self.log.messages(),
            log_version: self.log.version(),
            loading: self.is_awaiting_reply(),
            draft: self.input.draft(),
            box_height: self.input.box_height(),
            enter_submits: self.input.enter_submits(),
            can_send: self.can_send(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::responder::PlaceholderResponder;
    use std::time::Duration;

    /// Responder that answers immediately with a fixed result.
    struct Fixed(Result<String, ResponderError>);

    impl Responder for Fixed {
        fn respond(&self, _conversation_text: &str) -> ReplyFuture {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    fn controller_with(result: Result<String, ResponderError>) -> ConversationController {
        ConversationController::new(Arc::new(Fixed(result)))
    }

    fn roles(controller: &ConversationController) -> Vec<Role> {
        controller.log().messages().iter().map(Message::role).collect()
    }

    #[test]
    fn test_blank_submit_rejected() {
        let mut controller = controller_with(Ok("x".into()));
        for text in ["", "   ", "\n\t "] {
            assert_eq!(
                controller.submit(text).unwrap_err(),
                SubmitError::EmptyInput
            );
        }
        assert!(controller.log().is_empty());
        assert!(!controller.is_awaiting_reply());
        assert!(!controller.input().is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_submit_then_reply() {
        let mut controller = controller_with(Ok("hi there".into()));
        controller.set_text("hello", 24);

        let pending = controller.submit_draft().unwrap();
        assert_eq!(roles(&controller), vec![Role::User]);
        assert_eq!(controller.input().draft(), "");
        assert!(controller.view().loading);

        let result = pending.future.await;
        let outcome = controller.complete_reply(pending.ticket, result).unwrap();
        assert_eq!(outcome, ReplyOutcome::Appended);
        assert_eq!(roles(&controller), vec![Role::User, Role::Assistant]);
        assert_eq!(controller.log().messages()[1].content(), "hi there");
        assert_eq!(controller.state(), ReplyState::Idle);
    }

    #[test]
    fn test_second_submit_is_busy() {
        let mut controller = controller_with(Ok("x".into()));
        let _pending = controller.submit("first").unwrap();

        let err = controller.submit("second").unwrap_err();
        assert_eq!(err, SubmitError::Busy);
        assert_eq!(controller.log().len(), 1);
    }

    #[test]
    fn test_blank_checked_before_busy() {
        let mut controller = controller_with(Ok("x".into()));
        let _pending = controller.submit("first").unwrap();
        assert_eq!(controller.submit(" ").unwrap_err(), SubmitError::EmptyInput);
    }

    #[test]
    fn test_silent_failure_returns_to_idle() {
        let mut controller = controller_with(Ok("unused".into()));
        let pending = controller.submit("hello").unwrap();

        let outcome = controller
            .complete_reply(pending.ticket, Err(ResponderError::Failed("down".into())))
            .unwrap();
        assert!(matches!(outcome, ReplyOutcome::FailedSilently(_)));
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.state(), ReplyState::Idle);

        // Next submission goes through.
        assert!(controller.submit("again").is_ok());
    }

    #[test]
    fn test_notice_failure_appends_error() {
        let mut controller =
            controller_with(Ok("unused".into())).failure_policy(FailurePolicy::Notice);
        let pending = controller.submit("hello").unwrap();

        controller
            .complete_reply(pending.ticket, Err(ResponderError::Failed("down".into())))
            .unwrap();
        let last = controller.log().last().unwrap();
        assert_eq!(last.role(), Role::Assistant);
        assert_eq!(last.content(), "Error: responder failed: down");
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut controller = controller_with(Ok("x".into()));
        let first = controller.submit("one").unwrap();
        controller
            .complete_reply(first.ticket, Ok("reply".into()))
            .unwrap();

        let err = controller
            .complete_reply(first.ticket, Ok("again".into()))
            .unwrap_err();
        assert_eq!(err, CompletionError::UnexpectedReply(first.ticket));
        assert_eq!(controller.log().len(), 2);
    }

    #[tokio::test]
    async fn test_enter_then_alt_enter_flow() {
        let mut controller = controller_with(Ok("hi there".into()));
        controller.set_text("hello", 24);

        // Plain Enter with enter_submits off is a newline.
        assert!(matches!(
            controller.handle_key(KeyPress::enter()),
            KeyOutcome::Newline
        ));
        controller.set_text("hello\n", 48);
        assert!(controller.log().is_empty());

        let KeyOutcome::Submitted(pending) = controller.handle_key(KeyPress::alt_enter()) else {
            panic!("expected submit");
        };
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log().messages()[0].content(), "hello\n");

        let result = pending.future.await;
        controller.complete_reply(pending.ticket, result).unwrap();
        assert_eq!(roles(&controller), vec![Role::User, Role::Assistant]);
        assert_eq!(controller.log().messages()[1].content(), "hi there");
    }

    #[test]
    fn test_submit_key_downgraded_when_blank() {
        let mut controller = controller_with(Ok("x".into()));
        controller.toggle_enter_submits();
        controller.set_text("   ", 24);
        assert!(matches!(
            controller.handle_key(KeyPress::enter()),
            KeyOutcome::Ignored
        ));
        assert!(controller.log().is_empty());
    }

    #[test]
    fn test_submit_key_downgraded_while_busy() {
        let mut controller = controller_with(Ok("x".into()));
        controller.toggle_enter_submits();
        let _pending = controller.submit("first").unwrap();
        controller.set_text("second", 24);
        assert!(matches!(
            controller.handle_key(KeyPress::enter()),
            KeyOutcome::Ignored
        ));
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.input().draft(), "second");
    }

    #[test]
    fn test_user_submit_forces_scroll() {
        let mut controller = controller_with(Ok("x".into()));
        let _pending = controller.submit("hello").unwrap();
        let far = ScrollMetrics {
            scroll_height: 2000,
            scroll_top: 0,
            viewport_height: 300,
        };
        assert_eq!(
            controller.settle_layout(far),
            Some(ScrollDecision::JumpTo(1700))
        );
    }

    #[test]
    fn test_reply_far_from_bottom_does_not_scroll() {
        let mut controller = controller_with(Ok("x".into()));
        let pending = controller.submit("hello").unwrap();
        controller.settle_layout(ScrollMetrics::default());

        controller
            .complete_reply(pending.ticket, Ok("reply".into()))
            .unwrap();
        let scrolled_up = ScrollMetrics {
            scroll_height: 1000,
            scroll_top: 100,
            viewport_height: 300,
        };
        assert_eq!(
            controller.settle_layout(scrolled_up),
            Some(ScrollDecision::Stay)
        );
    }

    #[test]
    fn test_greeting_appended_at_start() {
        let config = ChatConfig {
            greeting: "Welcome!".into(),
            ..ChatConfig::default()
        };
        let controller = ConversationController::with_config(
            Arc::new(PlaceholderResponder::default()),
            &config,
            BoxSizing::default(),
        );
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log().messages()[0].role(), Role::Assistant);
        assert_eq!(controller.log().messages()[0].content(), "Welcome!");
    }

    #[test]
    fn test_config_enter_submits_applied() {
        let config = ChatConfig {
            enter_submits: true,
            ..ChatConfig::default()
        };
        let controller = ConversationController::with_config(
            Arc::new(Fixed(Ok(String::new()))),
            &config,
            BoxSizing::ROWS,
        );
        assert!(controller.view().enter_submits);
        assert_eq!(controller.view().box_height, 1);
    }

    #[test]
    fn test_view_can_send() {
        let mut controller = controller_with(Ok("x".into()));
        assert!(!controller.view().can_send);
        controller.set_text("hi", 24);
        assert!(controller.view().can_send);
        let _pending = controller.submit_draft().unwrap();
        controller.set_text("more", 24);
        assert!(!controller.view().can_send);
    }

    #[tokio::test(start_paused = true)]
    async fn test_placeholder_reply_arrives_after_delay() {
        let mut controller = ConversationController::new(Arc::new(PlaceholderResponder::new(
            Duration::from_secs(1),
            "hi there",
        )));
        let pending = controller.submit("hello").unwrap();
        let handle = tokio::spawn(pending.future);

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(!handle.is_finished());
        assert_eq!(controller.log().len(), 1);

        let result = handle.await.unwrap();
        controller.complete_reply(pending.ticket, result).unwrap();
        assert_eq!(controller.log().len(), 2);
    }
}
