//! Field-scoped validation results
//!
//! A [`BindingResult`] collects every problem found while binding form input
//! and validating the bound object. It travels with the re-rendered form so
//! each message can be shown next to its field.

pub mod rules;

pub use rules::{OwnerValidator, PetValidator, Validator, VisitValidator};

/// Error codes attached to [`FieldError`]s
pub mod codes {
    pub const REQUIRED: &str = "required";
    pub const TYPE_MISMATCH: &str = "typeMismatch";
    pub const DIGITS: &str = "digits";
    pub const NOT_FOUND: &str = "notFound";
    pub const DUPLICATE: &str = "duplicate";
}

/// One problem with one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
    pub message: String,
    /// Raw submitted text when it could not be converted
    pub rejected_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingResult {
    errors: Vec<FieldError>,
}

impl BindingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an error to `field`
    pub fn reject_value(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, code, message: message.into(), rejected_value: None });
    }

    /// Attach a conversion error to `field`, keeping the raw text
    pub fn reject_raw(
        &mut self,
        field: &'static str,
        code: &'static str,
        message: impl Into<String>,
        raw: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field,
            code,
            message: message.into(),
            rejected_value: Some(raw.into()),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn rejected_value(&self, field: &str) -> Option<&str> {
        self.field_error(field).and_then(|e| e.rejected_value.as_deref())
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_and_query() {
        let mut result = BindingResult::new();
        assert!(!result.has_errors());

        result.reject_value("lastName", codes::NOT_FOUND, "not found");
        result.reject_raw("birthDate", codes::TYPE_MISMATCH, "invalid date", "2020-13-40");

        assert!(result.has_errors());
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.field_error("lastName").unwrap().code, "notFound");
        assert_eq!(result.rejected_value("birthDate"), Some("2020-13-40"));
        assert_eq!(result.rejected_value("lastName"), None);
        assert!(!result.has_field_errors("city"));
    }
}
