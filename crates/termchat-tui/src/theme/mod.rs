//! Theme components for the TUI.
//!
//! - [`Theme`] - Catppuccin Mocha color palette

mod colors;

pub use colors::Theme;
