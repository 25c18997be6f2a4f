//! Screen layout for the chat widget.
//!
//! ```text
//!  Terminal                       <- header (1 row)
//!  12:00 agent@agentj             <- message log
//!    Hello!
//! ┌──────────────────────────────┐
//! │user@jdev:~$ █Type a message..│ <- input box (auto-grows)
//! └──────────────────────────────┘
//! [ ] Enter sends (Alt+Enter...)  <- controls (1 row)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows taken by the input box's borders.
pub const INPUT_CHROME: u16 = 2;

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    pub header: Rect,
    pub log: Rect,
    pub input: Rect,
    pub controls: Rect,
}

impl ChatLayout {
    /// Split `area` for an input box showing `input_rows` rows of text.
    ///
    /// The log keeps at least one row; the input box gives way first.
    pub fn new(area: Rect, input_rows: u16) -> Self {
        let input_height = input_rows.saturating_add(INPUT_CHROME);
        let [header, log, input, controls] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            log,
            input,
            controls,
        }
    }

    /// Inner width of the input box.
    pub fn input_inner_width(&self) -> u16 {
        self.input.width.saturating_sub(INPUT_CHROME)
    }
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
