//! Prompt-prefixed, auto-growing input box.
//!
//! The box is as tall as the engine's clamped box height plus borders.
//! Drafts taller than that scroll internally so the cursor stays visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::TextInputState;
use crate::text::wrap_draft_line;
use crate::theme::Theme;

const CURSOR: &str = "█";

/// Input box widget.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    prompt: &'a str,
    placeholder: &'a str,
    theme: &'a Theme,
    disabled: bool,
}

impl<'a> InputBar<'a> {
    pub fn new(input: &'a TextInputState, prompt: &'a str, theme: &'a Theme) -> Self {
        Self {
            input,
            prompt,
            placeholder: "",
            theme,
            disabled: false,
        }
    }

    /// Text shown while the draft is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Disable editing (a reply is outstanding).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Rows the draft occupies at `inner_width` columns, cursor included.
    pub fn content_rows(input: &TextInputState, prompt: &str, inner_width: u16) -> usize {
        let theme = Theme::default();
        InputBar::new(input, prompt, &theme)
            .build_lines(inner_width)
            .0
            .len()
    }

    fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.theme.cursor)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Wrapped display rows and the row holding the cursor.
    fn build_lines(&self, inner_width: u16) -> (Vec<Line<'static>>, usize) {
        let prompt = format!("{} ", self.prompt);
        let indent_width = prompt.width();
        let text_width = usize::from(inner_width).saturating_sub(indent_width).max(1);

        let text_style = if self.disabled {
            Style::default().fg(self.theme.muted)
        } else {
            Style::default().fg(self.theme.text)
        };
        let muted = Style::default().fg(self.theme.muted);
        let cursor_style = self.cursor_style();

        let logical = self.logical_lines(text_style, muted, cursor_style);

        let mut rows = Vec::new();
        let mut cursor_row = 0;
        for line in logical {
            for row in wrap_draft_line(line, text_width) {
                let has_cursor = row
                    .spans
                    .iter()
                    .any(|s| s.content == CURSOR && s.style == cursor_style);
                if has_cursor {
                    cursor_row = rows.len();
                }

                let prefix = if rows.is_empty() {
                    Span::styled(
                        prompt.clone(),
                        Style::default()
                            .fg(self.theme.prompt)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(" ".repeat(indent_width))
                };
                let mut spans = vec![prefix];
                spans.extend(row.spans);
                rows.push(Line::from(spans));
            }
        }
        (rows, cursor_row)
    }

    /// Unwrapped lines of the draft with the cursor block inserted.
    fn logical_lines(&self, text: Style, muted: Style, cursor: Style) -> Vec<Line<'static>> {
        let content = self.input.content();

        if content.is_empty() {
            let mut spans = Vec::new();
            if !self.disabled {
                spans.push(Span::styled(CURSOR, cursor));
            }
            if !self.placeholder.is_empty() {
                spans.push(Span::styled(self.placeholder.to_string(), muted));
            }
            return vec![Line::from(spans)];
        }

        let mut remaining = self.input.cursor();
        let mut lines = Vec::new();
        for line in content.split('\n') {
            let len = line.chars().count();
            let mut spans = Vec::new();
            if !self.disabled && remaining <= len {
                let at = line
                    .char_indices()
                    .nth(remaining)
                    .map_or(line.len(), |(i, _)| i);
                let (before, after) = line.split_at(at);
                if !before.is_empty() {
                    spans.push(Span::styled(before.to_string(), text));
                }
                spans.push(Span::styled(CURSOR, cursor));
                if !after.is_empty() {
                    spans.push(Span::styled(after.to_string(), text));
                }
                remaining = usize::MAX;
            } else {
                spans.push(Span::styled(line.to_string(), text));
                remaining = remaining.saturating_sub(len + 1);
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.disabled {
            Style::default().fg(self.theme.border)
        } else {
            Style::default().fg(self.theme.border_focused)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        let (lines, cursor_row) = self.build_lines(inner.width);
        let visible = usize::from(inner.height);

        // Keep the cursor row on screen.
        let scroll = if lines.len() <= visible {
            0
        } else {
            cursor_row.saturating_sub(visible.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(self.theme.base))
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
