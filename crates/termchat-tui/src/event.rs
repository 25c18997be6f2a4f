//! Event handling for the termchat TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use std::time::{Duration, Instant};
use termchat_engine::KeyPress;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Text pasted into the terminal.
    Paste(String),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that polls crossterm on a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    ///
    /// Ticks fire on schedule even while input keeps arriving.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling is blocking
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms.max(1));
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                if event::poll(timeout).unwrap_or(false) {
                    if let Some(e) = event::read().ok().and_then(translate) {
                        if tx_clone.send(e).is_err() {
                            break;
                        }
                    }
                }
                if Instant::now() >= next_tick {
                    next_tick += tick_rate;
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        // Release and repeat reports would double every keystroke.
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    Help,
    ToggleEnterSubmits,
    /// Enter, with its modifiers, for the submission policy.
    Enter(KeyPress),
    Newline,
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('t') => Action::ToggleEnterSubmits,
            KeyCode::Char('j') => Action::Newline,
            KeyCode::Home => Action::ScrollTop,
            KeyCode::End => Action::ScrollBottom,
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Enter => Action::Enter(KeyPress {
                alt,
                shift,
                ..KeyPress::enter()
            }),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Enter => Action::Enter(KeyPress {
            alt,
            shift,
            ..KeyPress::enter()
        }),
        KeyCode::Char(c) if !alt => Action::Insert(c),
        KeyCode::Esc => Action::Back,
        KeyCode::F(1) => Action::Help,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('t'), KeyModifiers::CONTROL)),
            Action::ToggleEnterSubmits
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Action::Newline
        );
    }

    #[test]
    fn test_enter_carries_modifiers() {
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::Enter(KeyPress::enter())
        );
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Action::Enter(KeyPress::shift_enter())
        );
        assert_eq!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::ALT)),
            Action::Enter(KeyPress::alt_enter())
        );
    }

    #[test]
    fn test_printable_chars_insert() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Insert('q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Action::Insert('Q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            Action::None
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            key_to_action(key(KeyCode::PageUp, KeyModifiers::NONE)),
            Action::PageUp
        );
        assert_eq!(
            key_to_action(key(KeyCode::End, KeyModifiers::CONTROL)),
            Action::ScrollBottom
        );
        assert_eq!(
            key_to_action(key(KeyCode::F(1), KeyModifiers::NONE)),
            Action::Help
        );
        assert_eq!(
            key_to_action(key(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Back
        );
    }

    #[test]
    fn test_translate_drops_key_release() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(translate(CrosstermEvent::Key(release)).is_none());
        let press = key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(matches!(
            translate(CrosstermEvent::Key(press)),
            Some(Event::Key(_))
        ));
    }
}
