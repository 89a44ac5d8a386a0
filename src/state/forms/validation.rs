//! Validation engine

use super::form_state::FormState;
use super::schema::{FormSchema, SchemaError};
use std::collections::HashMap;

/// Per-field error messages; empty means the form is valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: HashMap<String, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.errors.contains_key(name)
    }

    /// Record an error unless the field already has one
    pub fn insert(&mut self, name: &str, message: &str) {
        self.errors
            .entry(name.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// The error on the earliest field in schema order, independent of
    /// the order errors were recorded in.
    pub fn first_invalid<'s>(&self, schema: &'s FormSchema) -> Option<&'s str> {
        schema
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .find(|name| self.errors.contains_key(*name))
    }
}

/// Validate `state` against `schema`.
///
/// Field rules run in declared order and the first failure wins. Cross-field
/// rules run afterwards and never replace an error already recorded on their
/// reported field. A rule naming a field missing from `state` is a schema
/// mismatch.
pub fn validate(schema: &FormSchema, state: &FormState) -> Result<ValidationResult, SchemaError> {
    let mut result = ValidationResult::default();

    for spec in schema.fields() {
        let value = require(state, &spec.name)?;
        if let Some(message) = spec.first_failure(value) {
            result.insert(&spec.name, message);
        }
    }

    for rule in schema.cross_rules() {
        let [field, other] = rule.referenced_fields();
        let passed = require(state, field)? == require(state, other)?;
        if !passed {
            result.insert(rule.reported_field(), rule.message());
        }
    }

    tracing::debug!(errors = result.len(), "validated form");
    Ok(result)
}

fn require<'a>(state: &'a FormState, name: &str) -> Result<&'a str, SchemaError> {
    let value = state.require(name);
    debug_assert!(value.is_ok(), "form state has no value for `{name}`");
    value
}
