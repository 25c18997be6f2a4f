//! Controls row under the input box.
//!
//! ```text
//! [ ] Enter sends (Alt+Enter to send)       [ Send ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const SEND_LABEL: &str = "[ Send ]";

/// Enter-submits toggle label and send button.
pub struct ControlsBar<'a> {
    enter_submits: bool,
    can_send: bool,
    theme: &'a Theme,
}

impl<'a> ControlsBar<'a> {
    pub fn new(enter_submits: bool, can_send: bool, theme: &'a Theme) -> Self {
        Self {
            enter_submits,
            can_send,
            theme,
        }
    }

    /// Text of the Enter-submits toggle.
    pub fn toggle_label(enter_submits: bool) -> &'static str {
        if enter_submits {
            "[x] Enter sends"
        } else {
            "[ ] Enter sends (Alt+Enter to send)"
        }
    }

    /// Clickable region of the toggle within `area`.
    pub fn toggle_area(area: Rect, enter_submits: bool) -> Rect {
        let width = u16::try_from(Self::toggle_label(enter_submits).width()).unwrap_or(u16::MAX);
        Rect {
            width: width.min(area.width),
            height: area.height.min(1),
            ..area
        }
    }

    /// Clickable region of the send button within `area`.
    pub fn send_area(area: Rect) -> Rect {
        let width = u16::try_from(SEND_LABEL.len())
            .unwrap_or(u16::MAX)
            .min(area.width);
        Rect {
            x: area.right().saturating_sub(width),
            width,
            height: area.height.min(1),
            ..area
        }
    }
}

impl Widget for ControlsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let toggle = Self::toggle_area(area, self.enter_submits);
        buf.set_stringn(
            toggle.x,
            toggle.y,
            Self::toggle_label(self.enter_submits),
            usize::from(toggle.width),
            Style::default().fg(self.theme.muted),
        );

        let send = Self::send_area(area);
        // The toggle wins when the row is too narrow for both.
        if send.x < toggle.right() {
            return;
        }
        let send_style = if self.can_send {
            Style::default()
                .fg(self.theme.prompt)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        };
        buf.set_string(send.x, send.y, SEND_LABEL, send_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(enter_submits: bool, can_send: bool, width: u16) -> (String, Buffer) {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        ControlsBar::new(enter_submits, can_send, &theme).render(area, &mut buf);
        (buffer_to_string(&buf), buf)
    }

    #[test]
    fn test_layout_enter_submits_off() {
        let (out, _) = render(false, false, 50);
        insta::assert_snapshot!(out, @"[ ] Enter sends (Alt+Enter to send)       [ Send ]");
    }

    #[test]
    fn test_layout_enter_submits_on() {
        let (out, _) = render(true, true, 30);
        assert!(out.starts_with("[x] Enter sends"));
        assert!(out.ends_with("[ Send ]"));
    }

    #[test]
    fn test_send_dimmed_when_disabled() {
        let (_, buf) = render(false, false, 50);
        let cell = buf.cell((45, 0)).unwrap();
        assert!(cell.modifier.contains(Modifier::DIM));

        let (_, buf) = render(false, true, 50);
        let cell = buf.cell((45, 0)).unwrap();
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_hit_areas() {
        let area = Rect::new(2, 10, 40, 1);
        assert_eq!(ControlsBar::send_area(area), Rect::new(34, 10, 8, 1));
        assert_eq!(
            ControlsBar::toggle_area(area, true),
            Rect::new(2, 10, 15, 1)
        );
    }

    #[test]
    fn test_narrow_row_keeps_toggle() {
        let (out, _) = render(false, true, 36);
        assert!(!out.contains("Send ]"));
    }
}
