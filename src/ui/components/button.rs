//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button.
///
/// `accent` colors the label of an enabled, unfocused button. A disabled
/// button is drawn dimmed whether or not it has focus.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_focused: bool,
    is_enabled: bool,
    accent: Option<Color>,
) {
    let border_style = match (is_enabled, is_focused) {
        (true, true) => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::DarkGray),
    };

    let text_style = match (is_enabled, is_focused) {
        (false, _) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        (true, false) => Style::default().fg(accent.unwrap_or(Color::White)),
    };

    let paragraph = Paragraph::new(format!(" {label} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_label_is_rendered_centered() {
        let mut terminal = Terminal::new(TestBackend::new(20, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_button(frame, area, "Submit", false, true, None);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let middle: String = (0..20u16).map(|x| buffer[(x, 1u16)].symbol()).collect();
        assert!(middle.contains("Submit"));
        assert!(middle.starts_with('│'));
    }
}
