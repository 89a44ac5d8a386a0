//! UI module for rendering the TUI

pub mod components;
mod forms;
mod layout;

pub use forms::plan_layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let (form_area, status_area) = layout::create_layout(frame.area());

    forms::draw_registration_form(frame, form_area, &mut app.session, &mut app.viewport);
    layout::draw_status_bar(frame, status_area, app);

    // Modal notices sit on top of everything
    if let Some(notice) = &app.notice {
        components::render_notice_dialog(frame, notice);
    }
}
