//! Layout components (form area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::STATUS_BAR_HEIGHT;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                    // Form
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Keyboard hints for the focused element
fn hints(multiline: bool, submit_focused: bool) -> String {
    let enter = if submit_focused {
        "Enter:submit"
    } else if multiline {
        "Enter:newline"
    } else {
        "Enter:next"
    };
    format!("Tab/S-Tab:move | {enter} | {SUBMIT_SHORTCUT}:submit")
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let multiline = app
        .viewport
        .active_field()
        .and_then(|name| app.session.schema().field(name))
        .is_some_and(|spec| spec.is_multiline);

    let mut spans = vec![Span::styled(
        format!(" {}", hints(multiline, app.viewport.is_submit_focused())),
        Style::default().fg(Color::Gray),
    )];

    let error_count = app.session.errors().len();
    if error_count > 0 {
        spans.push(Span::raw(" | "));
        let noun = if error_count == 1 { "error" } else { "errors" };
        spans.push(Span::styled(
            format!("{error_count} {noun}"),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " Esc:quit ";
    let width = quit_hint.len() as u16;
    if area.width > width {
        let quit_area = Rect {
            x: area.x + area.width - width,
            width,
            ..area
        };
        let quit_widget =
            Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(quit_widget, quit_area);
    }
}
