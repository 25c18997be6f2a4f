//! Draft input buffer with auto-growing box sizing.
//!
//! The presentation layer measures how tall the draft wants to be and
//! hands that measurement to [`InputBuffer::set_text`]; the buffer clamps
//! it into [`BoxSizing`] bounds.

use serde::{Deserialize, Serialize};

/// Bounds for the input box height.
///
/// Units are whatever the presentation layer measures in (pixels for a web
/// host, rows for the terminal UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSizing {
    /// Smallest height the box shrinks to.
    pub min: u32,
    /// Largest height the box grows to before scrolling internally.
    pub max: u32,
}

impl BoxSizing {
    /// Pixel bounds for a browser-style box: 24 to 200.
    pub const PIXELS: Self = Self { min: 24, max: 200 };

    /// Row bounds for terminal rendering.
    pub const ROWS: Self = Self { min: 1, max: 8 };

    /// Clamp a measured content height into these bounds.
    pub fn clamp(self, measured: u32) -> u32 {
        measured.clamp(self.min, self.max.max(self.min))
    }
}

impl Default for BoxSizing {
    fn default() -> Self {
        Self::PIXELS
    }
}

/// The not-yet-submitted draft and its derived state.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    draft: String,
    enter_submits: bool,
    awaiting_reply: bool,
    sizing: BoxSizing,
    box_height: u32,
}

impl InputBuffer {
    /// Create an empty buffer with the given sizing.
    pub fn new(sizing: BoxSizing) -> Self {
        Self {
            draft: String::new(),
            enter_submits: false,
            awaiting_reply: false,
            sizing,
            box_height: sizing.min,
        }
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft and recompute the box height from the measured
    /// content height.
    pub fn set_text(&mut self, text: impl Into<String>, measured_height: u32) {
        self.draft = text.into();
        self.box_height = self.sizing.clamp(measured_height);
    }

    /// Empty the draft and shrink the box back to its minimum.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.box_height = self.sizing.min;
    }

    /// Height the presentation layer should give the input box.
    pub fn box_height(&self) -> u32 {
        self.box_height
    }

    /// Sizing bounds in effect.
    pub fn sizing(&self) -> BoxSizing {
        self.sizing
    }

    /// Whether a bare Enter submits.
    pub fn enter_submits(&self) -> bool {
        self.enter_submits
    }

    /// Set the Enter-submits mode explicitly.
    pub fn set_enter_submits(&mut self, enter_submits: bool) {
        self.enter_submits = enter_submits;
    }

    /// Flip the Enter-submits mode. Returns the new value.
    pub fn toggle_enter_submits(&mut self) -> bool {
        self.enter_submits = !self.enter_submits;
        self.enter_submits
    }

    /// Whether a reply is outstanding.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub(crate) fn set_awaiting_reply(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
    }

    /// True iff the trimmed draft is non-empty and no reply is outstanding.
    pub fn is_submittable(&self) -> bool {
        !self.draft.trim().is_empty() && !self.awaiting_reply
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(BoxSizing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_height_clamps() {
        let mut buffer = InputBuffer::default();

        buffer.set_text("a", 10);
        assert_eq!(buffer.box_height(), 24);

        buffer.set_text("a\n".repeat(40), 500);
        assert_eq!(buffer.box_height(), 200);

        buffer.set_text("a\nb\nc", 80);
        assert_eq!(buffer.box_height(), 80);
    }

    #[test]
    fn test_clear_resets_height() {
        let mut buffer = InputBuffer::default();
        buffer.set_text("long\ntext", 120);
        buffer.clear();
        assert_eq!(buffer.draft(), "");
        assert_eq!(buffer.box_height(), 24);
    }

    #[test]
    fn test_submittable_requires_non_blank() {
        let mut buffer = InputBuffer::default();
        assert!(!buffer.is_submittable());

        buffer.set_text("   \n\t", 24);
        assert!(!buffer.is_submittable());

        buffer.set_text(" hi ", 24);
        assert!(buffer.is_submittable());
    }

    #[test]
    fn test_submittable_blocked_while_awaiting() {
        let mut buffer = InputBuffer::default();
        buffer.set_text("hello", 24);
        buffer.set_awaiting_reply(true);
        assert!(!buffer.is_submittable());
    }

    #[test]
    fn test_toggle_enter_submits() {
        let mut buffer = InputBuffer::default();
        assert!(!buffer.enter_submits());
        assert!(buffer.toggle_enter_submits());
        assert!(!buffer.toggle_enter_submits());
    }

    #[test]
    fn test_clear_shrinks_box() {
        let mut buffer = InputBuffer::new(BoxSizing::ROWS);
        buffer.set_text("a\nb", 2);
        assert_eq!(buffer.box_height(), 2);
        buffer.clear();
        assert_eq!(buffer.draft(), "");
        assert_eq!(buffer.box_height(), 1);
    }

    #[test]
    fn test_row_sizing() {
        assert_eq!(BoxSizing::ROWS.clamp(0), 1);
        assert_eq!(BoxSizing::ROWS.clamp(3), 3);
        assert_eq!(BoxSizing::ROWS.clamp(30), 8);
    }
}
