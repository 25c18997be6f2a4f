//! Editable draft state with a character cursor.

/// Draft text plus a cursor, measured in characters.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    /// Cursor position (character index, `0..=chars`).
    cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character index `idx`.
    fn byte_offset(&self, idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Move to the start of the current line.
    pub fn move_home(&mut self) {
        let before: Vec<char> = self.content.chars().take(self.cursor).collect();
        self.cursor = before
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
    }

    /// Move to the end of the current line.
    pub fn move_end(&mut self) {
        let after = self
            .content
            .chars()
            .skip(self.cursor)
            .position(|c| c == '\n');
        self.cursor = match after {
            Some(n) => self.cursor + n,
            None => self.char_count(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_right();
        state.move_right();
        state.move_right();
        assert_eq!(state.cursor(), 6);
    }

    #[test]
    fn test_multibyte_chars() {
        let mut state = TextInputState::new();
        state.insert_str("héllo");
        state.move_home();
        state.move_right();
        state.move_right();
        state.backspace();
        assert_eq!(state.content(), "hllo");

        state.delete();
        assert_eq!(state.content(), "hlo");
    }

    #[test]
    fn test_home_end_are_line_relative() {
        let mut state = TextInputState::new();
        state.insert_str("first\nsecond");
        state.move_home();
        assert_eq!(state.cursor(), 6);
        state.move_left();
        state.move_home();
        assert_eq!(state.cursor(), 0);
        state.move_end();
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut state = TextInputState::new();
        state.insert_str("ab");
        state.delete();
        assert_eq!(state.content(), "ab");
    }
}
