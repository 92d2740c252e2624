//! Validation errors raised while turning form fields into an [`InputRecord`].
//!
//! [`InputRecord`]: crate::input::InputRecord

use thiserror::Error;

/// Message shown to the user for any rejected calculator submission
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter valid numbers.";

/// A calculator form field failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Missing(&'static str),

    #[error("field '{field}' is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("field '{0}' must not be negative")]
    Negative(&'static str),

    #[error("field '{0}' must be a finite number")]
    NotFinite(&'static str),
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field)
            | ValidationError::Negative(field)
            | ValidationError::NotFinite(field) => field,
            ValidationError::NotNumeric { field, .. } => field,
        }
    }

    /// Generic message safe to display next to the form
    pub fn user_message(&self) -> &'static str {
        INVALID_INPUT_MESSAGE
    }
}
