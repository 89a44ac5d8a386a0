//! Current field values of a form

use super::schema::{FormSchema, SchemaError};
use std::collections::HashMap;

/// Mapping from field name to its current value
///
/// Holds exactly the schema's fields; every field starts at its default
/// (empty) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
}

impl FormState {
    /// Create a state with an empty value for every schema field
    pub fn new(schema: &FormSchema) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), String::new()))
            .collect();
        Self { values }
    }

    /// Create a state from explicit values; unset schema fields default to empty
    #[cfg(test)]
    pub fn with_values<'a>(
        schema: &FormSchema,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, SchemaError> {
        let mut state = Self::new(schema);
        for (name, value) in values {
            state.set_value(name, value)?;
        }
        Ok(state)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Look up a value, treating absence as a schema mismatch
    pub fn require(&self, name: &str) -> Result<&str, SchemaError> {
        self.value(name)
            .ok_or_else(|| SchemaError::MissingValue(name.to_string()))
    }

    /// Replace a field's value (the change-event handler)
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), SchemaError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                slot.clear();
                slot.push_str(value);
                Ok(())
            }
            None => Err(SchemaError::UnknownField(name.to_string())),
        }
    }

    /// Append a typed character, honoring the field's kind and input cap.
    /// Returns whether the value changed.
    pub fn input_char(
        &mut self,
        schema: &FormSchema,
        name: &str,
        c: char,
    ) -> Result<bool, SchemaError> {
        let spec = schema
            .field(name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| SchemaError::MissingValue(name.to_string()))?;

        let accepted = if c == '\n' {
            spec.is_multiline
        } else {
            spec.kind.accepts(c)
        };
        let at_cap = spec
            .max_input_len
            .is_some_and(|max| slot.chars().count() >= max);
        if !accepted || at_cap {
            return Ok(false);
        }
        slot.push(c);
        Ok(true)
    }

    /// Remove the last character of a field
    pub fn backspace(&mut self, name: &str) -> Result<(), SchemaError> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
        slot.pop();
        Ok(())
    }

    /// Restore every field to its default value
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    pub fn is_pristine(&self) -> bool {
        self.values.values().all(String::is_empty)
    }
}
