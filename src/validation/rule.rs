//! Declarative field rules and rule sets.

use std::borrow::Cow;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::report::ValidationReport;

/// A bound that is either fixed or resolved at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// A fixed value.
    Fixed(i64),
    /// The current calendar year.
    CurrentYear,
}

impl Limit {
    fn resolve(self, today: NaiveDate) -> i64 {
        match self {
            Limit::Fixed(value) => value,
            Limit::CurrentYear => i64::from(today.year()),
        }
    }
}

/// A single check applied to one field.
///
/// Text checks read `null` as the empty string. Numeric and date checks pass
/// on `null`; pair them with [`Check::Required`] when the field is mandatory.
#[derive(Debug, Clone)]
pub enum Check {
    /// Not `null`, not blank, not an empty array.
    Required,
    /// At least this many characters after trimming.
    MinLength(usize),
    /// The text must match the pattern.
    Matches(Regex),
    /// The text must not contain a match of the pattern.
    Forbids(Regex),
    /// A number within the inclusive bounds.
    Range {
        /// Lower bound, if any.
        min: Option<Limit>,
        /// Upper bound, if any.
        max: Option<Limit>,
    },
    /// A `YYYY-MM-DD` date whose year lies within the inclusive bounds.
    YearBetween {
        /// Earliest allowed year.
        min: Limit,
        /// Latest allowed year.
        max: Limit,
    },
    /// A `YYYY-MM-DD` date that is not after today.
    NotAfterToday,
    /// A pattern that failed to compile. Always fails.
    Broken(String),
}

impl Check {
    /// Compiles a "must match" check.
    pub fn matches(pattern: &str) -> Self {
        Regex::new(pattern).map_or_else(|e| Check::Broken(e.to_string()), Check::Matches)
    }

    /// Compiles a "must not match" check.
    pub fn forbids(pattern: &str) -> Self {
        Regex::new(pattern).map_or_else(|e| Check::Broken(e.to_string()), Check::Forbids)
    }

    /// Returns `true` if `value` passes on `today`.
    fn passes(&self, value: &Value, today: NaiveDate) -> bool {
        match self {
            Check::Required => match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                Value::Array(items) => !items.is_empty(),
                _ => true,
            },
            Check::MinLength(min) => text(value).trim().chars().count() >= *min,
            Check::Matches(re) => re.is_match(&text(value)),
            Check::Forbids(re) => !re.is_match(&text(value)),
            Check::Range { min, max } => match number(value) {
                None => true,
                Some(None) => false,
                Some(Some(n)) => {
                    min.is_none_or(|m| n >= m.resolve(today) as f64)
                        && max.is_none_or(|m| n <= m.resolve(today) as f64)
                }
            },
            Check::YearBetween { min, max } => match date(value) {
                None => true,
                Some(None) => false,
                Some(Some(d)) => {
                    let year = i64::from(d.year());
                    year >= min.resolve(today) && year <= max.resolve(today)
                }
            },
            Check::NotAfterToday => match date(value) {
                None => true,
                Some(None) => false,
                Some(Some(d)) => d <= today,
            },
            Check::Broken(_) => false,
        }
    }
}

/// Renders a JSON value as the text a form field would hold.
fn text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// `None` for absent values, `Some(None)` for non-numeric ones.
fn number(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().parse().ok()),
        _ => Some(None),
    }
}

/// `None` for absent values, `Some(None)` for unparsable ones.
///
/// Accepts plain dates and timestamps that start with a date.
fn date(value: &Value) -> Option<Option<NaiveDate>> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => {
            let s = s.trim();
            let head = s.get(..10).unwrap_or(s);
            Some(NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        }
        _ => Some(None),
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    field: &'static str,
    check: Check,
    message: Cow<'static, str>,
}

/// An ordered table of field rules.
///
/// Rules run in declaration order and the first failure of a field wins.
/// The payload is read through its `serde` representation, so field names
/// are the serialized names.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::validation::{Check, RuleSet};
///
/// let rules = RuleSet::new()
///     .rule("name", Check::MinLength(5), "Name must be at least 5 characters.")
///     .rule("name", Check::forbids(r"\d"), "Name must not contain digits.");
///
/// let report = rules.validate(&serde_json::json!({ "name": "Poetry 2" }));
/// assert_eq!(report.error("name"), Some("Name must not contain digits."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Creates an empty rule set, which accepts every payload.
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule(
        mut self,
        field: &'static str,
        check: Check,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.rules.push(FieldRule {
            field,
            check,
            message: message.into(),
        });
        self
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates a payload against today's date.
    pub fn validate<P: Serialize + ?Sized>(&self, payload: &P) -> ValidationReport {
        self.validate_on(payload, Local::now().date_naive())
    }

    /// Validates a payload as of `today`.
    ///
    /// Never panics. A payload that does not serialize to a JSON object is
    /// read as an object with no fields.
    pub fn validate_on<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        today: NaiveDate,
    ) -> ValidationReport {
        let value = serde_json::to_value(payload).unwrap_or(Value::Null);
        let mut report = ValidationReport::valid();
        for rule in &self.rules {
            if report.has_error(rule.field) {
                continue;
            }
            let field = value.get(rule.field).unwrap_or(&Value::Null);
            if !rule.check.passes(field, today) {
                if let Check::Broken(ref reason) = rule.check {
                    tracing::warn!(field = rule.field, %reason, "validation rule has an invalid pattern");
                }
                report.reject(rule.field, rule.message.clone());
            }
        }
        report
    }
}
