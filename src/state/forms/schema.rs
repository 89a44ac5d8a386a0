//! Form schema: ordered field specs plus cross-field rules

use super::field::{CrossFieldRule, FieldSpec, Rule};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised when a schema and the data fed to it disagree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
    #[error("field `{0}` is not declared in the schema")]
    UnknownField(String),
    #[error("no value for field `{0}` in form state")]
    MissingValue(String),
}

/// Field names of the registration form
pub mod names {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const MOBILE: &str = "mobile";
    pub const SSN: &str = "ssn";
    pub const CONFIRM_SSN: &str = "confirmSsn";
    pub const EMERGENCY_NAME: &str = "contactEmergencyName";
    pub const EMERGENCY_MOBILE: &str = "contactEmergencyMobile";
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const PASSWORD: &str = "password";
}

/// Ordered sequence of fields plus cross-field rules
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
    cross_rules: Vec<CrossFieldRule>,
}

impl FormSchema {
    /// Build a schema, checking that every name referenced by a rule or by
    /// Enter-key navigation is declared exactly once.
    pub fn new(fields: Vec<FieldSpec>, cross_rules: Vec<CrossFieldRule>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        let next_refs = fields.iter().filter_map(|f| f.next_on_submit.as_deref());
        let cross_refs = cross_rules.iter().flat_map(|r| r.referenced_fields());
        if let Some(unknown) = next_refs.chain(cross_refs).find(|name| !seen.contains(name)) {
            return Err(SchemaError::UnknownField(unknown.to_string()));
        }

        Ok(Self {
            fields,
            cross_rules,
        })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn cross_rules(&self) -> &[CrossFieldRule] {
        &self.cross_rules
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared position of a field
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Ensure `name` is declared
    pub fn check_field(&self, name: &str) -> Result<(), SchemaError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(SchemaError::UnknownField(name.to_string()))
        }
    }

    /// The registration form: personal data, SSN with confirmation,
    /// emergency contact, address and password.
    pub fn registration() -> Self {
        use names::*;

        let fields = vec![
            FieldSpec::text(FIRST_NAME, "First Name *")
                .placeholder("Enter your first name")
                .rule(Rule::min_length(2, "First name must be at least 2 characters"))
                .next(LAST_NAME),
            FieldSpec::text(LAST_NAME, "Last Name *")
                .placeholder("Enter your last name")
                .rule(Rule::min_length(2, "Last name must be at least 2 characters"))
                .next(EMAIL),
            FieldSpec::text(EMAIL, "Email *")
                .placeholder("Enter your email")
                .rule(Rule::email("Please enter a valid email"))
                .next(MOBILE),
            FieldSpec::numeric(MOBILE, "Mobile Phone *")
                .placeholder("Enter your mobile number")
                .rule(Rule::min_length(10, "Mobile number must be at least 10 digits"))
                .next(SSN),
            FieldSpec::numeric(SSN, "SSN *")
                .placeholder("Enter your SSN")
                .rule(Rule::min_length(9, "SSN must be at least 9 digits"))
                .rule(Rule::max_length(11, "SSN must be at most 11 digits"))
                .max_input_len(11)
                .next(CONFIRM_SSN),
            FieldSpec::numeric(CONFIRM_SSN, "Confirm SSN *")
                .placeholder("Confirm your SSN")
                .max_input_len(11)
                .next(EMERGENCY_NAME),
            FieldSpec::text(EMERGENCY_NAME, "Emergency Contact Name *")
                .placeholder("Emergency contact name")
                .rule(Rule::min_length(
                    2,
                    "Emergency contact name must be at least 2 characters",
                ))
                .next(EMERGENCY_MOBILE),
            FieldSpec::numeric(EMERGENCY_MOBILE, "Emergency Contact Phone *")
                .placeholder("Emergency contact phone")
                .rule(Rule::min_length(
                    10,
                    "Emergency contact phone must be at least 10 digits",
                ))
                .next(ADDRESS),
            FieldSpec::text(ADDRESS, "Address *")
                .placeholder("Enter your full address")
                .rule(Rule::min_length(10, "Address must be at least 10 characters"))
                .multiline()
                .next(CITY),
            FieldSpec::text(CITY, "City *")
                .placeholder("Enter your city")
                .rule(Rule::min_length(2, "City must be at least 2 characters"))
                .next(PASSWORD),
            FieldSpec::secret(PASSWORD, "Password *")
                .placeholder("At least 6 characters")
                .rule(Rule::min_length(6, "Password must be at least 6 characters")),
        ];

        let cross_rules = vec![CrossFieldRule::equals(
            CONFIRM_SSN,
            SSN,
            "SSN and SSN confirmation must match",
        )];

        Self {
            fields,
            cross_rules,
        }
    }
}
