use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name → messages map collected while validating a submitted form.
///
/// Templates render it next to the offending inputs, so every failure is
/// kept rather than only the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record a message that applies to the whole form.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, empty when there are none.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                first = false;
                if field == NON_FIELD_ERRORS {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{field}: {message}")?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = Self::new();
        for (field, field_errors) in value.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", error.code));
                errors.add(&field.to_string(), message);
            }
        }
        errors
    }
}

impl From<TypeConstraintError> for FormErrors {
    fn from(value: TypeConstraintError) -> Self {
        Self::non_field(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FormErrors::new();
        errors.add("password2", "The two password fields didn't match.");
        errors.add("password2", "This password is too short.");
        errors.add("username", "This field is required.");

        assert_eq!(errors.field("password2").len(), 2);
        assert_eq!(errors.field("username"), ["This field is required."]);
        assert!(errors.field("password1").is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let errors = FormErrors::non_field("Please enter a correct username and password.");

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"__all__": ["Please enter a correct username and password."]})
        );
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = FormErrors::non_field("Bad form.");
        errors.add("username", "Taken.");

        assert_eq!(errors.to_string(), "Bad form.; username: Taken.");
    }
}
