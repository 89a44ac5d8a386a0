//! One mounted form: schema, values, errors, layout and the submit flow

use crate::state::focus::{FocusCoordinator, FocusHost};
use crate::state::forms::{validate, FieldLayout, FormSchema, FormState, SchemaError, ValidationResult};
use crate::state::submission::{
    RegistrationRecord, SubmissionHandler, SubmissionPipeline, SubmitOutcome, SubmitPhase,
};
use std::time::{Duration, Instant};

/// Everything the form screen owns while it is mounted
#[derive(Debug)]
pub struct FormSession {
    schema: FormSchema,
    values: FormState,
    errors: ValidationResult,
    layout: FieldLayout,
    focus: FocusCoordinator,
    pipeline: SubmissionPipeline,
    /// Set after the first submit attempt; edits then re-validate
    submitted_once: bool,
}

impl FormSession {
    pub fn new(schema: FormSchema, header_offset: u16, focus_delay: Duration) -> Self {
        let values = FormState::new(&schema);
        Self {
            schema,
            values,
            errors: ValidationResult::default(),
            layout: FieldLayout::default(),
            focus: FocusCoordinator::new(header_offset, focus_delay),
            pipeline: SubmissionPipeline::default(),
            submitted_once: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    pub fn phase(&self) -> SubmitPhase {
        self.pipeline.phase()
    }

    pub fn has_pending_focus(&self) -> bool {
        self.focus.pending().is_some()
    }

    /// Register a field's measured position (the layout callback)
    pub fn register_layout(&mut self, name: &str, offset: u16, height: u16) -> Result<(), SchemaError> {
        self.layout.register(&self.schema, name, offset, height)
    }

    /// Replace a field's value
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), SchemaError> {
        self.values.set_value(name, value)?;
        self.revalidate()
    }

    /// Type one character into a field
    pub fn input_char(&mut self, name: &str, c: char) -> Result<(), SchemaError> {
        if self.values.input_char(&self.schema, name, c)? {
            self.revalidate()?;
        }
        Ok(())
    }

    pub fn backspace(&mut self, name: &str) -> Result<(), SchemaError> {
        self.values.backspace(name)?;
        self.revalidate()
    }

    /// After a failed submit, keep the shown errors in step with edits
    fn revalidate(&mut self) -> Result<(), SchemaError> {
        if self.submitted_once {
            self.errors = validate(&self.schema, &self.values)?;
        }
        Ok(())
    }

    /// Run one submit attempt.
    ///
    /// Invalid input triggers focus recovery through `host`; valid input is
    /// handed to `handler`. The pipeline is back in `Idle` when this returns,
    /// whatever the handler did.
    pub async fn submit(
        &mut self,
        host: &mut dyn FocusHost,
        handler: &mut dyn SubmissionHandler,
        now: Instant,
    ) -> Result<SubmitOutcome, SchemaError> {
        self.pipeline.transition(SubmitPhase::Validating);
        self.submitted_once = true;

        let result = match validate(&self.schema, &self.values) {
            Ok(result) => result,
            Err(e) => {
                self.pipeline.transition(SubmitPhase::Idle);
                return Err(e);
            }
        };

        if !result.is_valid() {
            self.pipeline.transition(SubmitPhase::Invalid);
            let first_invalid = result
                .first_invalid(&self.schema)
                .map(str::to_string)
                .unwrap_or_default();
            self.focus.recover(&self.schema, &result, &self.layout, host, now);
            tracing::info!(errors = result.len(), first_invalid = %first_invalid, "submit rejected");
            self.errors = result;
            self.pipeline.transition(SubmitPhase::Idle);
            return Ok(SubmitOutcome::Invalid { first_invalid });
        }

        self.errors = result;
        self.focus.cancel();
        self.pipeline.transition(SubmitPhase::Valid);
        let record = match RegistrationRecord::from_state(&self.values) {
            Ok(record) => record,
            Err(e) => {
                self.pipeline.transition(SubmitPhase::Idle);
                return Err(e);
            }
        };

        self.pipeline.transition(SubmitPhase::Submitting);
        let outcome = match handler.submit(&record).await {
            Ok(()) => SubmitOutcome::Submitted(record),
            Err(e) => {
                tracing::warn!(error = %e, "submission handler failed");
                SubmitOutcome::HandlerFailed(e.to_string())
            }
        };
        self.pipeline.transition(SubmitPhase::Idle);
        Ok(outcome)
    }

    /// Fire a due focus request
    pub fn tick(&mut self, host: &mut dyn FocusHost, now: Instant) -> bool {
        self.focus.tick(host, now)
    }

    /// Back to defaults after a successful submission
    pub fn reset(&mut self) {
        self.values.reset();
        self.errors = ValidationResult::default();
        self.focus.cancel();
        self.submitted_once = false;
    }

    /// The screen is going away; cancel deferred work
    pub fn unmount(&mut self) {
        self.focus.unmount();
        self.layout.clear();
    }
}
