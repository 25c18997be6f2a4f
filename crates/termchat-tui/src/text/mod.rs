//! Text rendering utilities.
//!
//! - [`render_markdown`] - Render markdown to styled ratatui Lines
//! - [`MarkdownStyles`] - Style configuration for markdown elements
//! - [`wrap_lines`], [`wrap_draft_line`] - Wrapping to a column width

mod markdown;
mod styles;
mod wrap;

pub use markdown::{plain_lines, render_markdown, render_markdown_or_plain};
pub use styles::MarkdownStyles;
pub use wrap::{wrap_draft_line, wrap_line, wrap_lines};
