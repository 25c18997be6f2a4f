//! Widgets that make up the chat screen.
//!
//! - [`LogView`] - Scrollable message history
//! - [`InputBar`] - Auto-growing input box
//! - [`ControlsBar`] - Enter-submits toggle and send button
//! - [`HelpOverlay`] - Key binding popup

mod controls;
mod help;
mod input_bar;
mod message_log;
mod text_input;

pub use controls::ControlsBar;
pub use help::HelpOverlay;
pub use input_bar::InputBar;
pub use message_log::{log_lines, LogOptions, LogView};
pub use text_input::TextInputState;
