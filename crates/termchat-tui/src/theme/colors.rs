//! Catppuccin Mocha palette mapped onto terminal chat roles.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub header: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub muted: Color,

    // Chat roles
    pub prompt: Color,
    pub user_text: Color,
    pub agent: Color,
    pub timestamp: Color,
    pub cursor: Color,

    // Markdown accents
    pub code: Color,
    pub link: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            header: Color::Rgb(24, 24, 37), // #181825
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244), // #cdd6f4
            muted: Color::Rgb(108, 112, 134), // #6c7086

            prompt: Color::Rgb(166, 227, 161),    // #a6e3a1 (green)
            user_text: Color::Rgb(137, 180, 250), // #89b4fa (blue)
            agent: Color::Rgb(245, 194, 231),     // #f5c2e7 (pink)
            timestamp: Color::Rgb(108, 112, 134), // #6c7086
            cursor: Color::Rgb(243, 139, 168),    // #f38ba8 (red)

            code: Color::Rgb(148, 226, 213), // #94e2d5 (teal)
            link: Color::Rgb(180, 190, 254), // #b4befe (lavender)

            border: Color::Rgb(49, 50, 68),            // #313244
            border_focused: Color::Rgb(166, 227, 161), // #a6e3a1
        }
    }
}
