//! Conversion between ordered name/value pairs and the gateway's mappings.
//!
//! Callers see headers as an ordered list of explicit `(name, value)` pairs
//! ([`Headers`]). The gateway envelope carries a `name → value` object plus an
//! optional `name → [values]` object for names that occur more than once
//! ([`EnvelopeMap`]). Both conversions are total: every pair survives a round
//! trip, including repeated names and names that differ only in case.
//!
//! Query-string parameters use the same [`EnvelopeMap`] shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered list of header name/value pairs.
///
/// Names are kept exactly as given; no case folding is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a header, keeping any existing values for the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Returns the first value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Converts the pairs into the gateway's mapping form.
    #[must_use]
    pub fn to_envelope(&self) -> EnvelopeMap {
        EnvelopeMap::from_pairs(self.iter())
    }

    /// Rebuilds pairs from the gateway's mapping form.
    #[must_use]
    pub fn from_envelope(map: EnvelopeMap) -> Self {
        Self(map.into_pairs())
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The gateway's two-map representation of a multi-valued mapping.
///
/// `single` holds one value per name (the last one for repeated names), which
/// is what the `headers` / `queryStringParameters` wire objects carry.
/// `multi` holds every value for names that occur more than once and maps to
/// `multiValueHeaders` / `multiValueQueryStringParameters`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvelopeMap {
    /// One value per name.
    pub single: BTreeMap<String, String>,
    /// All values for repeated names.
    pub multi: BTreeMap<String, Vec<String>>,
}

impl EnvelopeMap {
    /// Groups pairs by name.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in pairs {
            grouped.entry(name.into()).or_default().push(value.into());
        }

        let mut map = Self::default();
        for (name, values) in grouped {
            let Some(last) = values.last().cloned() else {
                continue;
            };
            if values.len() > 1 {
                map.multi.insert(name.clone(), values);
            }
            map.single.insert(name, last);
        }
        map
    }

    /// Flattens back into pairs, grouped by name.
    ///
    /// Both maps are merged: a name's `multi` values come first, followed by
    /// its `single` value unless `multi` already holds that exact value.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let Self { single, mut multi } = self;
        let mut pairs = Vec::with_capacity(single.len());

        for (name, value) in single {
            let values = multi.remove(&name).unwrap_or_default();
            let seen = values.contains(&value);
            pairs.extend(values.into_iter().map(|v| (name.clone(), v)));
            if !seen {
                pairs.push((name, value));
            }
        }
        for (name, values) in multi {
            pairs.extend(values.into_iter().map(|v| (name.clone(), v)));
        }
        pairs
    }

    /// Returns `true` if both maps are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.multi.is_empty()
    }
}
