//! Frame rendering.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::layout::ChatLayout;
use crate::widgets::{log_lines, ControlsBar, HelpOverlay, InputBar, LogOptions, LogView};

const TITLE: &str = "Terminal";

fn input_rows(app: &App) -> u16 {
    u16::try_from(app.controller.input().box_height()).unwrap_or(u16::MAX)
}

/// Draw one frame.
///
/// Layout runs before the log is drawn so pending autoscroll requests are
/// resolved against the content height that includes the new message.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    // The input box is as wide as the frame whatever its height, so the
    // first split only measures the draft.
    let layout = ChatLayout::new(area, input_rows(app));
    app.set_input_width(layout.input_inner_width());
    let layout = ChatLayout::new(area, input_rows(app));

    let view = app.controller.view();
    let (loading, enter_submits, can_send) = (view.loading, view.enter_submits, view.can_send);
    let options = LogOptions {
        handle: &app.config.handle,
        loading,
        blink_on: app.blink_on(),
    };
    // One column is reserved for the scrollbar.
    let lines = log_lines(
        view.messages,
        options,
        &app.theme,
        layout.log.width.saturating_sub(1),
    );

    app.settle_log(lines.len(), layout.log.height);
    app.set_control_areas(
        ControlsBar::toggle_area(layout.controls, enter_submits),
        ControlsBar::send_area(layout.controls),
    );

    let theme = &app.theme;
    frame.render_widget(
        Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.text)
                    .bg(theme.header)
                    .add_modifier(Modifier::BOLD),
            ),
        layout.header,
    );
    frame.render_widget(LogView::new(&lines, app.log_scroll, theme), layout.log);
    frame.render_widget(
        InputBar::new(&app.input, &app.config.prompt, theme)
            .placeholder(&app.config.placeholder)
            .disabled(loading),
        layout.input,
    );
    frame.render_widget(
        ControlsBar::new(enter_submits, can_send, theme),
        layout.controls,
    );

    if app.show_help {
        frame.render_widget(HelpOverlay::new(theme), area);
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::event::Action;
    use crate::test_utils::{create_test_terminal, render_app_to_string};
    use termchat_engine::KeyPress;

    #[test]
    fn test_initial_screen() {
        let mut app = App::new_for_test();
        let out = render_app_to_string(&mut app, 50, 8);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows[0].trim(), "Terminal");
        assert!(rows[5].contains("user@jdev:~$ █Type a message..."));
        insta::assert_snapshot!(rows[7], @"[ ] Enter sends (Alt+Enter to send)       [ Send ]");
    }

    #[test]
    fn test_submitted_message_and_loading_indicator() {
        let mut app = App::new_for_test();
        for c in "hello".chars() {
            app.handle_action(Action::Insert(c));
        }
        let _pending = app.handle_action(Action::Enter(KeyPress::alt_enter()));

        let out = render_app_to_string(&mut app, 50, 12);
        assert!(out.contains("user@agentj"));
        assert!(out.contains("  hello"));
        assert!(out.contains("  _"));
        // Input disabled: placeholder, no cursor.
        assert!(out.contains("user@jdev:~$ Type a message..."));
    }

    #[test]
    fn test_input_box_grows() {
        let mut app = App::new_for_test();
        let mut terminal = create_test_terminal();
        terminal.draw(|f| super::draw(f, &mut app)).unwrap();
        app.handle_action(Action::Newline);
        app.handle_action(Action::Newline);
        terminal.draw(|f| super::draw(f, &mut app)).unwrap();
        assert_eq!(app.controller.input().box_height(), 3);
    }

    #[test]
    fn test_help_overlay_drawn() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Help);
        let out = render_app_to_string(&mut app, 80, 24);
        assert!(out.contains(" Help "));
    }
}
