//! Application state and core logic

use crate::config::FormConfig;
use crate::platform::is_submit_modifier;
use crate::state::{
    FormSchema, FormSession, FormViewport, SubmissionHandler, SubmitOutcome, UiArea,
};
use crate::ui::components::{Notice, BUTTON_HEIGHT};
use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

/// Rows moved per mouse wheel notch
const SCROLL_STEP: i32 = 3;

/// Main application struct
pub struct App {
    /// Form values, errors, layout and submit flow
    pub session: FormSession,
    /// Scroll position and focused field
    pub viewport: FormViewport,
    /// Receives validated registrations
    handler: Box<dyn SubmissionHandler>,
    /// Modal notice awaiting acknowledgement
    pub notice: Option<Notice>,
    /// Short feedback shown in the status bar
    pub status_message: Option<String>,
    reset_on_success: bool,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for mouse hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &FormConfig, handler: Box<dyn SubmissionHandler>) -> Self {
        let schema = FormSchema::registration();
        let viewport = FormViewport::new(&schema, config.scroll_animation());
        let session = FormSession::new(schema, config.header_offset(), config.focus_delay());
        Self {
            session,
            viewport,
            handler,
            notice: None,
            status_message: None,
            reset_on_success: config.reset_on_success(),
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether something is moving and the loop should poll at frame rate
    pub fn needs_fast_poll(&self) -> bool {
        self.viewport.is_animating() || self.session.has_pending_focus()
    }

    /// Advance animations and fire a due focus request
    pub fn tick(&mut self, now: Instant) {
        self.viewport.update(now);
        if self.session.tick(&mut self.viewport, now) {
            self.reveal_active();
        }
    }

    fn request_quit(&mut self) {
        if !self.session.values().is_pristine() {
            tracing::info!("quitting with unsubmitted input");
        }
        self.session.unmount();
        self.quit = true;
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        if self.notice.is_some() {
            return self.handle_notice_key(key);
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_quit();
            }
            KeyCode::Esc => self.request_quit(),
            KeyCode::Char('s') if is_submit_modifier(key.modifiers) => self.submit().await?,
            KeyCode::Tab => {
                self.viewport.next_field();
                self.reveal_active();
            }
            KeyCode::BackTab => {
                self.viewport.prev_field();
                self.reveal_active();
            }
            KeyCode::PageUp => self.viewport.scroll_by(-(self.page_rows() as i32)),
            KeyCode::PageDown => self.viewport.scroll_by(self.page_rows() as i32),
            KeyCode::Enter => self.handle_enter().await?,
            KeyCode::Backspace => {
                if let Some(name) = self.viewport.active_field() {
                    self.session.backspace(name)?;
                    self.after_edit();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                if let Some(name) = self.viewport.active_field() {
                    self.session.input_char(name, c)?;
                    self.after_edit();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Drop the "please fix" hint once edits have cleared every error
    fn after_edit(&mut self) {
        if self.session.errors().is_valid() {
            self.status_message = None;
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.dismiss_notice();
        }
        Ok(())
    }

    /// Close the notice; a dismissed success notice starts a fresh form
    pub fn dismiss_notice(&mut self) {
        let Some(notice) = self.notice.take() else {
            return;
        };
        if notice.is_success() && self.reset_on_success {
            self.session.reset();
            self.viewport.reset();
            self.status_message = None;
            tracing::debug!("form reset after successful submit");
        }
    }

    /// Enter moves along the field chain, adds a newline in multiline
    /// fields, and submits at the end of the chain
    async fn handle_enter(&mut self) -> Result<()> {
        let Some(name) = self.viewport.active_field() else {
            return self.submit().await;
        };
        let Some(spec) = self.session.schema().field(name) else {
            return Ok(());
        };

        if spec.is_multiline {
            let name = spec.name.clone();
            self.session.input_char(&name, '\n')?;
            self.after_edit();
        } else if let Some(next) = spec.next_on_submit.clone() {
            self.viewport.focus_field(&next);
            self.reveal_active();
        } else {
            self.submit().await?;
        }
        Ok(())
    }

    /// Run one submit attempt and surface its outcome
    pub async fn submit(&mut self) -> Result<()> {
        let outcome = self
            .session
            .submit(&mut self.viewport, self.handler.as_mut(), Instant::now())
            .await?;

        match outcome {
            SubmitOutcome::Invalid { first_invalid } => {
                let count = self.session.errors().len();
                tracing::debug!(%first_invalid, count, "submit blocked by validation");
                self.status_message = Some(format!("Please fix {count} field(s)"));
            }
            SubmitOutcome::Submitted(_) => {
                self.status_message = None;
                self.notice = Some(Notice::submitted());
            }
            SubmitOutcome::HandlerFailed(message) => {
                self.notice = Some(Notice::error(message));
            }
        }
        Ok(())
    }

    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.notice.is_some() {
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.viewport.scroll_by(-SCROLL_STEP),
            MouseEventKind::ScrollDown => self.viewport.scroll_by(SCROLL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                let terminal_height = self.terminal_size.map(|(h, _)| h).unwrap_or(24);
                if !UiArea::FormContent.contains_row(mouse.row, terminal_height) {
                    return Ok(());
                }
                let row = UiArea::FormContent.content_row(mouse.row, self.viewport.scroll_offset());
                if let Some(name) = self.session.layout().field_at(row) {
                    self.viewport.focus_field(name);
                } else {
                    let plan = crate::ui::plan_layout(self.session.schema(), self.session.errors());
                    if (plan.submit_offset..plan.submit_offset + BUTTON_HEIGHT).contains(&row) {
                        self.viewport.focus_submit();
                        self.submit().await?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Rows of form content visible at once
    fn page_rows(&self) -> u16 {
        let terminal_height = self.terminal_size.map(|(h, _)| h).unwrap_or(24);
        terminal_height
            .saturating_sub(UiArea::FormContent.start_y() + 2)
            .max(1)
    }

    /// Scroll the focused element fully into view
    fn reveal_active(&mut self) {
        match self.viewport.active_field() {
            Some(name) => {
                let layout = self.session.layout();
                if let (Some(offset), Some(height)) = (layout.offset(name), layout.height(name)) {
                    self.viewport.reveal(offset, height);
                }
            }
            None => {
                let plan = crate::ui::plan_layout(self.session.schema(), self.session.errors());
                self.viewport.reveal(plan.submit_offset, BUTTON_HEIGHT);
            }
        }
    }
}
