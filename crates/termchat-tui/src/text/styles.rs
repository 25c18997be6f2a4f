//! Markdown styling for message bodies.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

/// Styles for rendering markdown elements.
#[derive(Debug, Clone)]
pub struct MarkdownStyles {
    /// Base body text.
    pub text: Style,
    pub h1: Style,
    pub h2: Style,
    /// H3 and deeper.
    pub h3: Style,
    pub emphasis: Style,
    pub strong: Style,
    pub strikethrough: Style,
    /// Inline code span.
    pub code: Style,
    /// Fenced or indented code block line.
    pub code_block: Style,
    pub link: Style,
    pub blockquote: Style,
    /// Bullets, numbers and task boxes.
    pub list_marker: Style,
    /// Horizontal rule.
    pub rule: Style,
}

impl MarkdownStyles {
    /// Styles for a body whose plain text is drawn in `fg`.
    pub fn for_body(theme: &Theme, fg: Color) -> Self {
        Self {
            text: Style::default().fg(fg),
            h1: Style::default()
                .fg(theme.prompt)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default().fg(theme.prompt).add_modifier(Modifier::BOLD),
            h3: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            code: Style::default().fg(theme.code).bg(theme.surface),
            code_block: Style::default().fg(theme.code).bg(theme.header),
            link: Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(theme.prompt),
            rule: Style::default().fg(theme.border),
        }
    }

    /// Styles for assistant replies.
    pub fn assistant(theme: &Theme) -> Self {
        Self::for_body(theme, theme.text)
    }
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self::assistant(&Theme::default())
    }
}
