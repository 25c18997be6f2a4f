//! Key binding overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_fixed;
use crate::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("Enter", "Send or newline, per toggle"),
    ("Alt/Shift+Enter", "Send when Enter adds lines"),
    ("Ctrl+J", "Insert newline"),
    ("Ctrl+T", "Toggle Enter sends"),
    ("PgUp/PgDn", "Scroll history"),
    ("F1", "Toggle this help"),
    ("Esc / Ctrl+C", "Quit"),
];

/// Centered help popup.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default()
            .fg(self.theme.prompt)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(self.theme.text);

        let mut lines = vec![Line::default()];
        lines.extend(BINDINGS.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {key:<17}"), key_style),
                Span::styled(*action, text_style),
            ])
        }));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  [Esc to close]",
            Style::default().fg(self.theme.muted),
        )));

        let width = 50.min(area.width.saturating_sub(4));
        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let overlay = centered_fixed(width, height.min(area.height), area);

        Clear.render(overlay, buf);
        let block = Block::default()
            .title(" Help ")
            .title_style(key_style)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.surface));
        Paragraph::new(lines).block(block).render(overlay, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_lists_bindings() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        HelpOverlay::new(&theme).render(area, &mut buf);
        let out = buffer_to_string(&buf);
        assert!(out.contains(" Help "));
        assert!(out.contains("Ctrl+T"));
        assert!(out.contains("Toggle Enter sends"));
    }
}
