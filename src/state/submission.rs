//! Submission pipeline types and the submission collaborator

use crate::state::forms::{names, FormState, SchemaError};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A validated registration, one value per form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub ssn: String,
    pub confirm_ssn: String,
    pub contact_emergency_name: String,
    pub contact_emergency_mobile: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl RegistrationRecord {
    /// Snapshot the form values into a typed record
    pub fn from_state(state: &FormState) -> Result<Self, SchemaError> {
        let get = |name: &str| state.require(name).map(str::to_string);
        Ok(Self {
            first_name: get(names::FIRST_NAME)?,
            last_name: get(names::LAST_NAME)?,
            email: get(names::EMAIL)?,
            mobile: get(names::MOBILE)?,
            ssn: get(names::SSN)?,
            confirm_ssn: get(names::CONFIRM_SSN)?,
            contact_emergency_name: get(names::EMERGENCY_NAME)?,
            contact_emergency_mobile: get(names::EMERGENCY_MOBILE)?,
            address: get(names::ADDRESS)?,
            city: get(names::CITY)?,
            password: get(names::PASSWORD)?,
        })
    }
}

/// Receives validated records; what it does with them is its own business
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    /// Accept a validated record
    async fn submit(&mut self, record: &RegistrationRecord) -> Result<()>;
}

/// Logs each submission as JSON
#[derive(Debug, Default)]
pub struct LoggingSubmissionHandler {
    submitted: usize,
}

impl LoggingSubmissionHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionHandler for LoggingSubmissionHandler {
    async fn submit(&mut self, record: &RegistrationRecord) -> Result<()> {
        let submission_id = Uuid::new_v4();
        let received_at: DateTime<Utc> = Utc::now();
        let body = serde_json::to_string(record)?;
        tracing::info!(
            %submission_id,
            received_at = %received_at.to_rfc3339(),
            record = %body,
            "registration submitted"
        );
        self.submitted += 1;
        tracing::debug!(total = self.submitted, "submission count");
        Ok(())
    }
}

/// Phase of the submit state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Valid,
    Submitting,
}

impl SubmitPhase {
    /// Whether `self -> next` is an edge of the state machine
    pub fn can_transition(self, next: SubmitPhase) -> bool {
        use SubmitPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Invalid)
                | (Validating, Valid)
                | (Validating, Idle)
                | (Invalid, Idle)
                | (Valid, Submitting)
                | (Valid, Idle)
                | (Submitting, Idle)
        )
    }
}

/// Tracks the current submit phase
#[derive(Debug, Default)]
pub struct SubmissionPipeline {
    phase: SubmitPhase,
}

impl SubmissionPipeline {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn transition(&mut self, next: SubmitPhase) {
        debug_assert!(
            self.phase.can_transition(next),
            "illegal submit transition {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(from = ?self.phase, to = ?next, "submit phase");
        self.phase = next;
    }
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; `first_invalid` is the field focus recovery targets
    Invalid { first_invalid: String },
    /// The handler accepted the record
    Submitted(RegistrationRecord),
    /// The handler rejected the record
    HandlerFailed(String),
}
