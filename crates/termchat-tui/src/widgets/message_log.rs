//! Scrollable message history.
//!
//! Each message is a header row (`HH:MM user@handle`) followed by its
//! wrapped body. Assistant bodies are rendered as markdown; user bodies
//! are shown verbatim.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use termchat_engine::{Message, Role};

use crate::text::{plain_lines, render_markdown_or_plain, wrap_lines, MarkdownStyles};
use crate::theme::Theme;

/// Indent applied to message bodies.
const BODY_INDENT: &str = "  ";

/// Options for building log rows.
#[derive(Debug, Clone, Copy)]
pub struct LogOptions<'a> {
    /// Handle shown in author labels.
    pub handle: &'a str,
    /// Whether a reply is outstanding.
    pub loading: bool,
    /// Blink phase of the loading indicator.
    pub blink_on: bool,
}

/// Build the wrapped display rows for `messages` at `width` columns.
pub fn log_lines(
    messages: &[Message],
    options: LogOptions<'_>,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let body_width = usize::from(width).saturating_sub(BODY_INDENT.len());
    let mut rows = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            rows.push(Line::default());
        }
        rows.push(header_line(message, options.handle, theme));
        for line in wrap_lines(body_lines(message, theme), body_width) {
            let mut spans = vec![Span::raw(BODY_INDENT)];
            spans.extend(line.spans);
            rows.push(Line::from(spans).style(line.style));
        }
    }

    if options.loading {
        if !rows.is_empty() {
            rows.push(Line::default());
        }
        let indicator = if options.blink_on { "_" } else { " " };
        rows.push(Line::from(vec![
            Span::raw(BODY_INDENT),
            Span::styled(
                indicator,
                Style::default()
                    .fg(theme.cursor)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    rows
}

fn header_line(message: &Message, handle: &str, theme: &Theme) -> Line<'static> {
    let author_color = match message.role() {
        Role::User => theme.prompt,
        Role::Assistant => theme.agent,
    };
    Line::from(vec![
        Span::styled(message.time_label(), Style::default().fg(theme.timestamp)),
        Span::raw(" "),
        Span::styled(
            message.author_label(handle),
            Style::default()
                .fg(author_color)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn body_lines(message: &Message, theme: &Theme) -> Vec<Line<'static>> {
    match message.role() {
        Role::Assistant => {
            let styles = MarkdownStyles::assistant(theme);
            let lines = render_markdown_or_plain(message.content(), &styles);
            if lines.is_empty() {
                vec![Line::default()]
            } else {
                lines
            }
        }
        Role::User => plain_lines(message.content(), Style::default().fg(theme.user_text)),
    }
}

/// Log viewport with a scrollbar.
pub struct LogView<'a> {
    lines: &'a [Line<'static>],
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> LogView<'a> {
    pub fn new(lines: &'a [Line<'static>], scroll: u16, theme: &'a Theme) -> Self {
        Self {
            lines,
            scroll,
            theme,
        }
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines.to_vec())
            .style(Style::default().fg(self.theme.text).bg(self.theme.base))
            .scroll((self.scroll, 0))
            .render(area, buf);

        if self.lines.len() > usize::from(area.height) {
            let mut state = ScrollbarState::new(self.lines.len())
                .viewport_content_length(usize::from(area.height))
                .position(usize::from(self.scroll));
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .thumb_style(Style::default().fg(self.theme.muted))
                .track_style(Style::default().fg(self.theme.border))
                .render(area, buf, &mut state);
        }
    }
}
