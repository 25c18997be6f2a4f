//! Markdown to HTML rendering for message content.
//!
//! Rendering is synchronous. When a message cannot be rendered,
//! [`render_or_plain`] falls back to escaped plain text so one bad message
//! never aborts rendering the rest of the log.

use pulldown_cmark::{html, Options, Parser};
use tracing::warn;

/// Largest source accepted by [`HtmlRenderer`], in bytes.
pub const MAX_SOURCE_LEN: usize = 1024 * 1024;

/// Errors that can occur while rendering markdown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The source contains a NUL character.
    #[error("malformed markdown: NUL character at byte {0}")]
    NulCharacter(usize),

    /// The source exceeds [`MAX_SOURCE_LEN`].
    #[error("markdown source too large: {0} bytes")]
    TooLarge(usize),
}

/// Reject sources no renderer should accept.
pub fn check_source(source: &str) -> Result<(), RenderError> {
    if source.len() > MAX_SOURCE_LEN {
        return Err(RenderError::TooLarge(source.len()));
    }
    if let Some(pos) = source.find('\0') {
        return Err(RenderError::NulCharacter(pos));
    }
    Ok(())
}

/// Converts markdown source into trusted HTML.
pub trait MarkdownRenderer {
    /// Render `source` to HTML.
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark backed renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Parser options shared with other markdown consumers.
    pub fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

impl MarkdownRenderer for HtmlRenderer {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        check_source(source)?;

        let parser = Parser::new_ext(source, Self::options());
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Result of rendering one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Rendered HTML.
    Markup(String),
    /// Escaped source text, used when rendering failed.
    Plain(String),
}

impl Rendered {
    /// HTML to insert into the document.
    pub fn as_html(&self) -> &str {
        match self {
            Rendered::Markup(s) | Rendered::Plain(s) => s,
        }
    }

    /// Whether rendering fell back to plain text.
    pub fn is_plain(&self) -> bool {
        matches!(self, Rendered::Plain(_))
    }
}

/// Render `source`, falling back to escaped plain text on error.
pub fn render_or_plain(renderer: &dyn MarkdownRenderer, source: &str) -> Rendered {
    match renderer.render(source) {
        Ok(html) => Rendered::Markup(html),
        Err(e) => {
            warn!(error = %e, "markdown render failed, showing plain text");
            Rendered::Plain(escape_html(source))
        }
    }
}

/// Escape text for insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\0' => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}
