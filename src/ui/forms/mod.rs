//! Form rendering module
//!
//! - `field_renderer`: one bordered field with its error line
//! - `registration_form`: the scrollable registration form

mod field_renderer;
mod registration_form;

pub use registration_form::{draw as draw_registration_form, plan_layout};
