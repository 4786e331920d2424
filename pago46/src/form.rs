//! Form values and their wire encoding.
//!
//! The same encoded form is used three ways: as the POST body, as the query
//! string of GET/DELETE requests, and (after a small post-processing step) as
//! the last segment of the canonical signing string. The server rebuilds that
//! segment itself, so the encoding must be byte-for-byte reproducible: keys
//! are sorted and each key may carry several values in insertion order.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// A multi-valued map of form fields, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, Vec<String>>);

impl FormValues {
    /// Creates an empty set of form values.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Replaces all values of `key` with a single `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Appends `value` to the values of `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the first value of `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// Returns `true` when no field has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Encodes the values as `application/x-www-form-urlencoded`, sorted by key.
    ///
    /// Spaces become `+`, as in any HTML form submission.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Encodes the values for the canonical signing string.
    ///
    /// Starts from [`Self::encode`] and rewrites it into RFC 3986 percent
    /// encoding: `+` becomes `%20`, `*` becomes `%2A` and `%7E` goes back to `~`.
    #[must_use]
    pub fn encode_for_signing(&self) -> String {
        percent_encode(&self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.append(k, v);
        }
        values
    }
}

/// Rewrites a form-urlencoded string into the percent encoding used for signing.
pub(crate) fn percent_encode(form_encoded: &str) -> String {
    form_encoded
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Query-escapes a single component (method, path) of the canonical string.
///
/// Spaces stay `+`; `*` becomes `%2A` and `~` is left literal.
pub(crate) fn escape(component: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(component.as_bytes()).collect();
    encoded.replace('*', "%2A").replace("%7E", "~")
}
