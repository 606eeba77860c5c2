//! Explicit form binding
//!
//! Every form has a statically declared table mapping field names to
//! setters. Only names present in the table can reach a model; names in the
//! denylist (identity fields) are dropped before lookup.
//!
//! ```rust,ignore
//! let mut owner = Owner::default();
//! let mut result = BindingResult::new();
//! OWNER_BINDER.bind(&mut owner, &form, &(), &mut result);
//! ```

mod forms;

pub use forms::{OWNER_BINDER, OWNER_SEARCH_BINDER, PET_BINDER, VISIT_BINDER};

use crate::validation::{codes, BindingResult};
use crate::ClinicError;

/// Decoded `application/x-www-form-urlencoded` pairs, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pairs: Vec<(String, String)>,
}

impl Form {
    /// Parse an urlencoded body or query string
    pub fn parse(encoded: &str) -> Result<Self, ClinicError> {
        let mut pairs = Vec::new();
        for part in encoded.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = part.split_once('=').unwrap_or((part, ""));
            pairs.push((decode_component(name)?, decode_component(value)?));
        }
        Ok(Self { pairs })
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode_component(raw: &str) -> Result<String, ClinicError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ClinicError::BadRequest(format!("invalid form encoding: {}", e)))
}

/// A raw value that could not be converted to the field's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindFailure {
    pub message: String,
}

impl BindFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub type Setter<T, C> = fn(&mut T, &str, &C) -> Result<(), BindFailure>;

/// One row of a binding table
pub struct FieldBinding<T: 'static, C: 'static> {
    pub name: &'static str,
    pub set: Setter<T, C>,
}

/// Static field-mapping table for one form.
///
/// `C` is lookup context a setter may need, e.g. the known pet types.
pub struct Binder<T: 'static, C: 'static> {
    pub fields: &'static [FieldBinding<T, C>],
    pub denied: &'static [&'static str],
}

impl<T: 'static, C: 'static> Binder<T, C> {
    /// Apply every bindable pair of `form` to `target`.
    ///
    /// Conversion failures are recorded as `typeMismatch` and keep the raw
    /// text so the form can show what was typed.
    pub fn bind(&self, target: &mut T, form: &Form, ctx: &C, result: &mut BindingResult) {
        for (name, value) in form.pairs() {
            if self.denied.iter().any(|denied| *denied == name) {
                log::debug!("Ignoring disallowed form field '{}'", name);
                continue;
            }
            let Some(field) = self.fields.iter().find(|f| f.name == name) else {
                continue;
            };
            if let Err(failure) = (field.set)(target, value, ctx) {
                result.reject_raw(field.name, codes::TYPE_MISMATCH, failure.message, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_plus_and_escapes() {
        let form = Form::parse("lastName=Mc+Tavish&city=Sun%20Prairie&flag&=x").unwrap();
        assert_eq!(form.get("lastName"), Some("Mc Tavish"));
        assert_eq!(form.get("city"), Some("Sun Prairie"));
        assert_eq!(form.get("flag"), Some(""));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let err = Form::parse("name=%FF%FE").unwrap_err();
        assert!(matches!(err, ClinicError::BadRequest(_)));
    }

    #[test]
    fn test_empty_input_is_empty_form() {
        assert!(Form::parse("").unwrap().is_empty());
    }

    struct Counter {
        value: u32,
    }

    fn set_value(counter: &mut Counter, raw: &str, _: &()) -> Result<(), BindFailure> {
        counter.value = raw.parse().map_err(|_| BindFailure::new("not a number"))?;
        Ok(())
    }

    static COUNTER_BINDER: Binder<Counter, ()> = Binder {
        fields: &[FieldBinding { name: "value", set: set_value }],
        denied: &["id"],
    };

    #[test]
    fn test_bind_records_type_mismatch_with_raw_value() {
        let mut counter = Counter { value: 1 };
        let mut result = BindingResult::new();
        COUNTER_BINDER.bind(&mut counter, &Form::from_pairs([("value", "ten")]), &(), &mut result);

        assert_eq!(counter.value, 1);
        let error = result.field_error("value").unwrap();
        assert_eq!(error.code, codes::TYPE_MISMATCH);
        assert_eq!(error.rejected_value.as_deref(), Some("ten"));
    }

    #[test]
    fn test_bind_skips_denied_and_unknown_fields() {
        let mut counter = Counter { value: 1 };
        let mut result = BindingResult::new();
        let form = Form::from_pairs([("id", "99"), ("other", "x"), ("value", "7")]);
        COUNTER_BINDER.bind(&mut counter, &form, &(), &mut result);

        assert_eq!(counter.value, 7);
        assert!(!result.has_errors());
    }
}
