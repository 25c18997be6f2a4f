//! Markdown rendering using pulldown-cmark.
//!
//! Converts message content into styled ratatui Lines. Lines are not
//! wrapped here; see [`super::wrap_lines`].

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use termchat_engine::markdown::{check_source, HtmlRenderer};
use termchat_engine::RenderError;
use tracing::warn;

use super::styles::MarkdownStyles;

/// Render markdown to styled lines.
pub fn render_markdown(
    input: &str,
    styles: &MarkdownStyles,
) -> Result<Vec<Line<'static>>, RenderError> {
    check_source(input)?;

    let mut writer = LineWriter::new(styles);
    for event in Parser::new_ext(input, HtmlRenderer::options()) {
        writer.handle(event);
    }
    Ok(writer.finish())
}

/// Render markdown, falling back to the raw text when it is malformed.
pub fn render_markdown_or_plain(input: &str, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    match render_markdown(input, styles) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "markdown render failed, showing plain text");
            plain_lines(&input.replace('\0', "\u{FFFD}"), styles.text)
        }
    }
}

/// Split text on newlines into lines with a single style.
pub fn plain_lines(input: &str, style: Style) -> Vec<Line<'static>> {
    input
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), style)))
        .collect()
}

/// List nesting state: `Some(n)` for ordered lists, `None` for bullets.
type ListKind = Option<u64>;

struct LineWriter<'s> {
    styles: &'s MarkdownStyles,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    lists: Vec<ListKind>,
    quote_depth: usize,
    in_code_block: bool,
    pending_marker: Option<String>,
    link_targets: Vec<String>,
}

impl<'s> LineWriter<'s> {
    fn new(styles: &'s MarkdownStyles) -> Self {
        Self {
            styles,
            lines: Vec::new(),
            spans: Vec::new(),
            style_stack: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            pending_marker: None,
            link_targets: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.prefix();
                let style = self.current_style().patch(self.styles.code);
                self.spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(24), self.styles.rule)));
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.prefix();
                self.spans
                    .push(Span::styled(marker.to_string(), self.styles.list_marker));
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let style = match level {
                    HeadingLevel::H1 => self.styles.h1,
                    HeadingLevel::H2 => self.styles.h2,
                    _ => self.styles.h3,
                };
                self.style_stack.push(style);
            }
            Tag::Emphasis => self.style_stack.push(self.styles.emphasis),
            Tag::Strong => self.style_stack.push(self.styles.strong),
            Tag::Strikethrough => self.style_stack.push(self.styles.strikethrough),
            Tag::Link { dest_url, .. } => {
                self.style_stack.push(self.styles.link);
                self.link_targets.push(dest_url.to_string());
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    let lang: &str = &lang;
                    if !lang.is_empty() {
                        self.lines.push(Line::from(Span::styled(
                            format!("  [{lang}]"),
                            self.styles.blockquote,
                        )));
                    }
                }
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.pending_marker = Some(marker);
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush();
                self.style_stack.pop();
                self.blank();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link => {
                self.style_stack.pop();
                if let Some(url) = self.link_targets.pop() {
                    if !url.is_empty() {
                        self.spans
                            .push(Span::styled(format!(" <{url}>"), self.styles.blockquote));
                    }
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::Paragraph => {
                self.flush();
                // Paragraphs inside list items stay tight.
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.lines.push(Line::from(Span::styled(
                    format!("  {line}"),
                    self.styles.code_block,
                )));
            }
            return;
        }

        self.prefix();
        let style = self.current_style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    /// Emit the blockquote bar and any pending list marker at the start of
    /// a line.
    fn prefix(&mut self) {
        if self.spans.is_empty() && self.quote_depth > 0 {
            self.spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                self.styles.blockquote,
            ));
        }
        if let Some(marker) = self.pending_marker.take() {
            self.spans.push(Span::styled(marker, self.styles.list_marker));
        }
    }

    fn current_style(&self) -> Style {
        let base = if self.quote_depth > 0 {
            self.styles.text.patch(self.styles.blockquote)
        } else {
            self.styles.text
        };
        self.style_stack
            .iter()
            .fold(base, |style, layer| style.patch(*layer))
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from(spans));
        }
    }

    /// Push a separating blank line, never two in a row.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }
}
