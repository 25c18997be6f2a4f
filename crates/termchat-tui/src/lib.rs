//! termchat-tui: Terminal front end for the termchat widget
//!
//! This crate draws the conversation engine in a terminal:
//! - Message log with markdown replies and follow-the-bottom scrolling
//! - Auto-growing input box with a configurable Enter key
//! - Controls row with the Enter-sends toggle and a send button

mod app;
mod event;
mod layout;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
mod ui;
pub mod widgets;

pub use app::{App, ROW_UNITS};
pub use event::{Action, Event, EventHandler};
pub use termchat_engine;
pub use theme::Theme;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use termchat_engine::{ChatConfig, ReplyTicket, ResponderError};
use tokio::task::JoinHandle;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// The reply currently being driven, if any.
type InFlight = Option<(ReplyTicket, JoinHandle<Result<String, ResponderError>>)>;

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit. Replies come from the placeholder responder configured in
/// `config`.
pub async fn run_tui(config: ChatConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate_ms);
    let responder = Arc::new(config.placeholder_responder());
    let mut app = App::new(config, Theme::default(), responder);
    info!("termchat started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut in_flight: InFlight = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events.next().await {
            let submitted = match event {
                Event::Key(key) => app.handle_action(event::key_to_action(key)),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(text) => {
                    app.paste(&text);
                    None
                }
                Event::Tick => {
                    app.tick();
                    None
                }
                Event::Resize(_, _) => None,
            };
            if let Some(pending) = submitted {
                in_flight = Some((pending.ticket, tokio::spawn(pending.future)));
            }
        }

        // Collect a finished reply (non-blocking)
        if in_flight
            .as_ref()
            .is_some_and(|(_, handle)| handle.is_finished())
        {
            if let Some((ticket, handle)) = in_flight.take() {
                let result = handle
                    .await
                    .unwrap_or_else(|e| Err(ResponderError::Aborted(e.to_string())));
                app.finish_reply(ticket, result);
            }
        }

        if app.should_quit {
            if let Some((_, handle)) = in_flight {
                handle.abort();
            }
            info!("termchat exiting");
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
