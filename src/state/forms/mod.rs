//! Form domain layer
//!
//! Field schema, current values, validation and measured layout for the
//! registration form. Nothing here knows about the terminal.

mod field;
mod form_state;
mod layout;
mod schema;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use field::FieldSpec;
pub use form_state::FormState;
pub use layout::FieldLayout;
pub use schema::{names, FormSchema, SchemaError};
pub use validation::{validate, ValidationResult};
