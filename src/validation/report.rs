//! Validation results.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The outcome of validating a payload.
///
/// Holds at most one message per field: the first rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    is_valid: bool,
    field_errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// A report without errors.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            field_errors: BTreeMap::new(),
        }
    }

    /// Returns `true` if no field failed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns every field error, keyed by field name.
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    /// Returns the error for `field`, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    /// Returns `true` if `field` already has an error.
    pub(crate) fn has_error(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    /// Records an error unless the field already has one.
    pub(crate) fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
        self.is_valid = false;
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::valid()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return f.write_str("valid");
        }
        let mut first = true;
        for (field, message) in &self.field_errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}
