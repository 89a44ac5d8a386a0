//! Registration form rendering
//!
//! Lays the fields out in one tall column, reports every field's offset to
//! the session, and draws the part of the column the viewport shows.

use super::field_renderer::{draw_field, field_height};
use crate::state::{FormSchema, FormSession, FormViewport, SubmitPhase, ValidationResult};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows above the first field: heading plus a blank line
pub const HEADING_HEIGHT: u16 = 2;

/// Position of one field block in content coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub name: String,
    pub offset: u16,
    pub height: u16,
}

/// Content layout of the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPlan {
    pub fields: Vec<FieldRow>,
    pub submit_offset: u16,
    pub content_height: u16,
}

/// Lay out every field in schema order; error lines push later fields down
pub fn plan_layout(schema: &FormSchema, errors: &ValidationResult) -> FormPlan {
    let mut offset = HEADING_HEIGHT;
    let fields = schema
        .fields()
        .iter()
        .map(|spec| {
            let height = field_height(spec, errors.has_error(&spec.name));
            let row = FieldRow {
                name: spec.name.clone(),
                offset,
                height,
            };
            offset += height;
            row
        })
        .collect();

    // One blank row before the submit button
    let submit_offset = offset + 1;
    FormPlan {
        fields,
        submit_offset,
        content_height: submit_offset + BUTTON_HEIGHT,
    }
}

/// Draw the form, registering field layout as it goes
pub fn draw(frame: &mut Frame, area: Rect, session: &mut FormSession, viewport: &mut FormViewport) {
    let block = Block::default()
        .title(" Registration Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let plan = plan_layout(session.schema(), session.errors());
    for row in &plan.fields {
        if let Err(e) = session.register_layout(&row.name, row.offset, row.height) {
            tracing::error!(error = %e, "layout registration failed");
        }
    }
    viewport.set_extent(plan.content_height, inner.height);
    let scroll = viewport.scroll_offset();

    // Visible rect for a block at content `offset`, if it fits entirely
    let visible = |offset: u16, height: u16| -> Option<Rect> {
        let top = offset.checked_sub(scroll)?;
        (top + height <= inner.height).then(|| Rect {
            x: inner.x + 1,
            y: inner.y + top,
            width: inner.width.saturating_sub(2),
            height,
        })
    };

    if let Some(rect) = visible(0, 1) {
        let heading = Paragraph::new(Span::styled(
            "Sign up",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(heading, rect);
    }

    let values = session.values();
    let errors = session.errors();
    for (spec, row) in session.schema().fields().iter().zip(&plan.fields) {
        if let Some(rect) = visible(row.offset, row.height) {
            draw_field(
                frame,
                rect,
                spec,
                values.value(&spec.name).unwrap_or_default(),
                errors.error(&spec.name),
                viewport.active_field() == Some(spec.name.as_str()),
            );
        }
    }

    if let Some(rect) = visible(plan.submit_offset, BUTTON_HEIGHT) {
        let button = Rect {
            width: rect.width.min(24),
            ..rect
        };
        render_button(
            frame,
            button,
            "Submit",
            viewport.is_submit_focused(),
            session.phase() == SubmitPhase::Idle,
            Some(Color::Green),
        );
    }

    draw_scroll_indicators(frame, inner, scroll, viewport.max_scroll());
}

fn draw_scroll_indicators(frame: &mut Frame, inner: Rect, scroll: u16, max_scroll: u16) {
    if inner.height == 0 || inner.width == 0 {
        return;
    }
    let style = Style::default().fg(Color::DarkGray);
    let column = Rect {
        x: inner.x + inner.width - 1,
        width: 1,
        height: 1,
        ..inner
    };
    if scroll > 0 {
        frame.render_widget(Paragraph::new(Span::styled("^", style)), column);
    }
    if scroll < max_scroll {
        let bottom = Rect {
            y: inner.y + inner.height - 1,
            ..column
        };
        frame.render_widget(Paragraph::new(Span::styled("v", style)), bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::names;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    #[test]
    fn test_plan_without_errors() {
        let schema = FormSchema::registration();
        let plan = plan_layout(&schema, &ValidationResult::default());

        assert_eq!(plan.fields.len(), schema.field_count());
        assert_eq!(plan.fields[0].offset, HEADING_HEIGHT);
        assert_eq!(plan.fields[1].offset, HEADING_HEIGHT + 3);
        let address = plan.fields.iter().find(|r| r.name == names::ADDRESS).unwrap();
        assert_eq!(address.height, 5);
        // 10 single-line fields of 3 rows plus the 5-row address
        assert_eq!(plan.submit_offset, HEADING_HEIGHT + 35 + 1);
        assert_eq!(plan.content_height, plan.submit_offset + BUTTON_HEIGHT);
    }

    #[test]
    fn test_error_line_shifts_later_fields() {
        let schema = FormSchema::registration();
        let clean = plan_layout(&schema, &ValidationResult::default());
        let mut errors = ValidationResult::default();
        errors.insert(names::FIRST_NAME, "too short");
        let dirty = plan_layout(&schema, &errors);

        assert_eq!(dirty.fields[0].height, clean.fields[0].height + 1);
        assert_eq!(dirty.fields[0].offset, clean.fields[0].offset);
        assert_eq!(dirty.fields[1].offset, clean.fields[1].offset + 1);
    }

    #[test]
    fn test_draw_registers_every_field() {
        let mut session = FormSession::new(FormSchema::registration(), 1, Duration::ZERO);
        let mut viewport = FormViewport::new(session.schema(), Duration::ZERO);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &mut session, &mut viewport);
            })
            .unwrap();

        let plan = plan_layout(session.schema(), session.errors());
        for row in &plan.fields {
            assert_eq!(session.layout().offset(&row.name), Some(row.offset));
        }
        // 18 content rows inside the borders
        assert_eq!(viewport.max_scroll(), plan.content_height - 18);
    }

    #[test]
    fn test_draw_shows_heading_and_first_field() {
        let mut session = FormSession::new(FormSchema::registration(), 1, Duration::ZERO);
        let mut viewport = FormViewport::new(session.schema(), Duration::ZERO);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &mut session, &mut viewport);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Sign up"));
        assert!(text.contains("First Name *"));
    }
}
