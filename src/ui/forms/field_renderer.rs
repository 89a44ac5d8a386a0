//! Field rendering utilities for forms

use crate::state::FieldSpec;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a bordered single-line input
pub const INPUT_HEIGHT: u16 = 3;
/// Rows taken by a bordered multiline input
pub const MULTILINE_INPUT_HEIGHT: u16 = 5;
/// Rows taken by the error line under an invalid input
pub const ERROR_LINE_HEIGHT: u16 = 1;

/// Height of a field block, including its error line when present
pub fn field_height(spec: &FieldSpec, has_error: bool) -> u16 {
    let input = if spec.is_multiline {
        MULTILINE_INPUT_HEIGHT
    } else {
        INPUT_HEIGHT
    };
    if has_error {
        input + ERROR_LINE_HEIGHT
    } else {
        input
    }
}

/// Draw one form field: bordered input plus its error message, if any
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let border_style = match (error.is_some(), is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = spec.display_value(value);
    let cursor = if is_active { "▌" } else { "" };

    let content = if display_value.is_empty() && !is_active {
        Paragraph::new(Line::from(Span::styled(
            spec.placeholder.as_str(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
    } else if spec.is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, text_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let input_height = area.height.saturating_sub(if error.is_some() {
        ERROR_LINE_HEIGHT
    } else {
        0
    });
    let input_area = Rect {
        height: input_height,
        ..area
    };

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), input_area);

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y + input_height,
            height: ERROR_LINE_HEIGHT,
            ..area
        };
        let line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, error_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_height() {
        let single = FieldSpec::text("city", "City");
        let multi = FieldSpec::text("address", "Address").multiline();
        assert_eq!(field_height(&single, false), 3);
        assert_eq!(field_height(&single, true), 4);
        assert_eq!(field_height(&multi, false), 5);
        assert_eq!(field_height(&multi, true), 6);
    }
}
