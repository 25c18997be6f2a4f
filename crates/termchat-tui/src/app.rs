//! Application state for the termchat TUI.

use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use termchat_engine::{
    BoxSizing, ChatConfig, ConversationController, KeyOutcome, KeyPress, PendingReply,
    ReplyTicket, Responder, ResponderError, ScrollDecision, ScrollMetrics,
};
use tracing::{debug, warn};

use crate::event::Action;
use crate::theme::Theme;
use crate::widgets::{InputBar, TextInputState};

/// Scroll units per terminal row. The autoscroll threshold is expressed in
/// these units, so the default of 100 is five rows.
pub const ROW_UNITS: u32 = 20;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: u16 = 3;

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Tick counter for animations.
    pub tick: usize,

    /// Draft, log and reply state.
    pub controller: ConversationController,

    /// Editable draft with cursor.
    pub input: TextInputState,

    pub config: ChatConfig,
    pub theme: Theme,

    /// First visible log row.
    pub log_scroll: u16,

    log_rows: u16,
    log_viewport: u16,
    input_width: u16,
    toggle_area: Rect,
    send_area: Rect,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: ChatConfig, theme: Theme, responder: Arc<dyn Responder>) -> Self {
        let controller = ConversationController::with_config(responder, &config, BoxSizing::ROWS);
        Self {
            should_quit: false,
            show_help: false,
            tick: 0,
            controller,
            input: TextInputState::new(),
            config,
            theme,
            log_scroll: 0,
            log_rows: 0,
            log_viewport: 0,
            input_width: 0,
            toggle_area: Rect::default(),
            send_area: Rect::default(),
        }
    }

    /// Handle an action. Returns the reply to drive when it submitted.
    pub fn handle_action(&mut self, action: Action) -> Option<PendingReply> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return None;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return None;
            }
            _ => {}
        }

        // Any key closes help
        if self.show_help {
            self.show_help = false;
            return None;
        }

        match action {
            Action::Back => self.should_quit = true,
            Action::ToggleEnterSubmits => {
                self.controller.toggle_enter_submits();
            }
            Action::Enter(press) => return self.press_enter(press),
            // Ctrl+J stands in for Shift+Enter, which many terminals cannot report.
            Action::Newline => return self.press_enter(KeyPress::shift_enter()),
            Action::Insert(c) => self.edit(|input| input.insert(c)),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::Left => self.edit(TextInputState::move_left),
            Action::Right => self.edit(TextInputState::move_right),
            Action::Home => self.edit(TextInputState::move_home),
            Action::End => self.edit(TextInputState::move_end),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-i32::from(self.page_rows())),
            Action::PageDown => self.scroll_by(i32::from(self.page_rows())),
            Action::ScrollTop => self.log_scroll = 0,
            Action::ScrollBottom => self.log_scroll = self.max_scroll(),
            Action::Quit | Action::Help | Action::None => {}
        }
        None
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<PendingReply> {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-i32::from(WHEEL_ROWS)),
            MouseEventKind::ScrollDown => self.scroll_by(i32::from(WHEEL_ROWS)),
            MouseEventKind::Down(MouseButton::Left) => {
                return self.click(mouse.column, mouse.row);
            }
            _ => {}
        }
        None
    }

    /// Insert pasted text at the cursor.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.edit(|input| input.insert_str(&text));
    }

    /// Feed a settled reply back into the controller.
    pub fn finish_reply(&mut self, ticket: ReplyTicket, result: Result<String, ResponderError>) {
        match self.controller.complete_reply(ticket, result) {
            Ok(outcome) => debug!(?outcome, "reply settled"),
            Err(e) => warn!(error = %e, "dropping reply"),
        }
    }

    /// Increment tick counter.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Blink phase for the loading indicator (toggles every two ticks).
    pub fn blink_on(&self) -> bool {
        (self.tick / 2) % 2 == 0
    }

    /// Record the input box's inner width, re-measuring the draft when it
    /// changes.
    pub fn set_input_width(&mut self, width: u16) {
        if width != self.input_width {
            self.input_width = width;
            self.sync_draft();
        }
    }

    /// Record where the controls were drawn, for mouse hits.
    pub fn set_control_areas(&mut self, toggle: Rect, send: Rect) {
        self.toggle_area = toggle;
        self.send_area = send;
    }

    /// Post-layout pass over the log: clamp the scroll position and apply
    /// any pending autoscroll.
    pub fn settle_log(&mut self, content_rows: usize, viewport_rows: u16) {
        self.log_rows = u16::try_from(content_rows).unwrap_or(u16::MAX);
        self.log_viewport = viewport_rows;
        self.log_scroll = self.log_scroll.min(self.max_scroll());

        let metrics = ScrollMetrics {
            scroll_height: u32::from(self.log_rows) * ROW_UNITS,
            scroll_top: u32::from(self.log_scroll) * ROW_UNITS,
            viewport_height: u32::from(viewport_rows) * ROW_UNITS,
        };
        if let Some(ScrollDecision::JumpTo(offset)) = self.controller.settle_layout(metrics) {
            let row = u16::try_from(offset / ROW_UNITS).unwrap_or(u16::MAX);
            self.log_scroll = row.min(self.max_scroll());
        }
    }

    /// Largest useful scroll position.
    pub fn max_scroll(&self) -> u16 {
        self.log_rows.saturating_sub(self.log_viewport)
    }

    fn page_rows(&self) -> u16 {
        self.log_viewport.saturating_sub(1).max(1)
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.log_scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.log_scroll = u16::try_from(target).unwrap_or(0);
    }

    /// Apply an edit to the draft unless a reply is outstanding.
    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        if self.controller.is_awaiting_reply() {
            return;
        }
        f(&mut self.input);
        self.sync_draft();
    }

    /// Push the draft and its measured height to the controller.
    fn sync_draft(&mut self) {
        let rows = InputBar::content_rows(&self.input, &self.config.prompt, self.input_width);
        self.controller.set_text(
            self.input.content(),
            u32::try_from(rows).unwrap_or(u32::MAX),
        );
    }

    fn press_enter(&mut self, press: KeyPress) -> Option<PendingReply> {
        if self.controller.is_awaiting_reply() {
            return None;
        }
        match self.controller.handle_key(press) {
            KeyOutcome::Submitted(pending) => {
                self.input.clear();
                Some(pending)
            }
            KeyOutcome::Newline => {
                self.edit(|input| input.insert('\n'));
                None
            }
            KeyOutcome::Ignored => None,
        }
    }

    fn click(&mut self, column: u16, row: u16) -> Option<PendingReply> {
        let at = Position::new(column, row);
        if self.send_area.contains(at) {
            return match self.controller.submit_draft() {
                Ok(pending) => {
                    self.input.clear();
                    Some(pending)
                }
                Err(e) => {
                    debug!(error = %e, "send ignored");
                    None
                }
            };
        }
        if self.toggle_area.contains(at) {
            self.controller.toggle_enter_submits();
        }
        None
    }

    /// Create an app for tests: instant replies, no greeting.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        use std::time::Duration;
        use termchat_engine::PlaceholderResponder;

        let responder = Arc::new(PlaceholderResponder::new(Duration::ZERO, "hi there"));
        let mut app = Self::new(ChatConfig::default(), Theme::default(), responder);
        app.set_input_width(40);
        app
    }
}
