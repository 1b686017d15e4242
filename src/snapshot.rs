//! Serializer: a form's field values to and from the cached string.
//!
//! The cached form is a compact JSON object of field name to string value.
//! Names are unique, the first non-empty value for a name wins, and empty
//! values never appear. A form with nothing to cache encodes to the empty
//! string rather than `{}`, so callers can tell "nothing to save" apart from
//! "save an empty object" and skip the write.

use serde_json::{Map, Value};

use crate::store::StoreError;

/// Why a cached form could not be loaded. All variants mean "restore nothing".
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no cached data")]
    NoData,
    #[error("storage is unavailable")]
    StoreUnavailable,
    #[error("malformed cached data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cached data is not an object")]
    NotAnObject,
    #[error("storage read failed: {0}")]
    Store(StoreError),
}

impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => Self::StoreUnavailable,
            StoreError::EmptyKey => Self::NoData,
            other => Self::Store(other),
        }
    }
}

/// Ordered, deduplicated name→value pairs captured from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(String, String)>,
}

impl FormSnapshot {
    /// Capture `(name, value)` pairs in order. Empty values are skipped and
    /// only the first non-empty value for each name is kept.
    pub fn from_fields<I, N, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut snapshot = Self::default();
        for (name, value) in fields {
            snapshot.push(name.as_ref(), value.as_ref());
        }
        snapshot
    }

    fn push(&mut self, name: &str, value: &str) {
        if value.is_empty() || self.get(name).is_some() {
            return;
        }
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Value recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON object, or `""` when there is nothing to cache.
    #[must_use]
    pub fn encode(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(n, v)| (n.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map).to_string()
    }

    /// Parse a cached string back into a snapshot.
    ///
    /// Values follow the same truthiness rule the writer applies: non-empty
    /// strings are kept, `true` and non-zero numbers are stringified, and
    /// everything else is dropped.
    ///
    /// # Errors
    ///
    /// [`LoadError::NoData`] for blank input or `null`, [`LoadError::Malformed`]
    /// for unparsable input, [`LoadError::NotAnObject`] for any other JSON type.
    pub fn decode(raw: &str) -> Result<Self, LoadError> {
        if raw.trim().is_empty() {
            return Err(LoadError::NoData);
        }
        let map = match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            Value::Null => return Err(LoadError::NoData),
            _ => return Err(LoadError::NotAnObject),
        };
        let mut snapshot = Self::default();
        for (name, value) in &map {
            if let Some(text) = truthy_text(value) {
                snapshot.push(name, &text);
            }
        }
        Ok(snapshot)
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() > 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Encode `(name, value)` pairs into the cached string form.
///
/// Shorthand for [`FormSnapshot::from_fields`] followed by [`FormSnapshot::encode`].
pub fn serialize<I, N, V>(fields: I) -> String
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    FormSnapshot::from_fields(fields).encode()
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
