//! Filter values and filter sets for search queries.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// A scalar filter value.
///
/// Each variant knows how to render itself as a query parameter. Empty text
/// renders to nothing, so a cleared search box never sends `title=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Free text such as a title or an author name. Trimmed on output.
    Text(String),
    /// An enumerated value such as a status (`"AVAILABLE"`, `"BORROWED"`).
    Enum(String),
    /// A whole number such as a publication year or a category id.
    Number(i64),
    /// A calendar date, sent as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// A boolean flag, sent as `true`/`false`.
    Flag(bool),
}

impl FilterValue {
    /// Creates an enumerated value.
    pub fn enumerated(value: impl Into<String>) -> Self {
        FilterValue::Enum(value.into())
    }

    /// Returns the query parameter value, or `None` if the value is empty.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            FilterValue::Text(text) | FilterValue::Enum(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FilterValue::Number(n) => Some(n.to_string()),
            FilterValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            FilterValue::Flag(flag) => Some(flag.to_string()),
        }
    }

    /// Returns `true` if this value would be omitted from a query.
    pub fn is_empty(&self) -> bool {
        self.to_query_value().is_none()
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_query_value().as_deref().unwrap_or(""))
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Number(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Number(i64::from(value))
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

/// A named set of optional filter values.
///
/// Keys are the backend's query parameter names (`title`, `categoryId`,
/// `status`, `startDate`, ...). Ordering is by key so queries are stable.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::FilterSet;
///
/// let mut filters = FilterSet::new();
/// filters.set("title", "Hobbit");
/// filters.set("authorName", "   ");
/// filters.set("publicationYear", 1937);
///
/// assert_eq!(
///     filters.to_query_pairs(),
///     vec![
///         ("publicationYear".to_string(), "1937".to_string()),
///         ("title".to_string(), "Hobbit".to_string()),
///     ],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets `key` when `value` is `Some`, clears it otherwise.
    pub fn set_opt<V: Into<FilterValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.values.insert(key, value.into());
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Removes `key`.
    pub fn clear(&mut self, key: &str) -> Option<FilterValue> {
        self.values.remove(key)
    }

    /// Removes every value.
    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Returns `true` if no value would be sent.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(FilterValue::is_empty)
    }

    /// Iterates over all stored values, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the non-empty values as query pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(key, value)| value.to_query_value().map(|v| (key.clone(), v)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}
