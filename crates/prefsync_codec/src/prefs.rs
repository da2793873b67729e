//! Preference maps on either side of the coercion boundary.

use crate::value::PrefValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Flat string-keyed, string-valued preferences as stored by the server.
///
/// Entries the server reports as `null` are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemotePreferences(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for RemotePreferences {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        ))
    }
}

impl RemotePreferences {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RemotePreferences {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Typed client preferences, keyed by preference name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPreferences(BTreeMap<String, PrefValue>);

impl ClientPreferences {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PrefValue>) -> Option<PrefValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.0.get(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PrefValue> {
        self.0.remove(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Overwrites entries with those present in `other`. Keys absent from
    /// `other` are left untouched.
    pub fn merge(&mut self, other: ClientPreferences) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>> FromIterator<(K, PrefValue)> for ClientPreferences {
    fn from_iter<I: IntoIterator<Item = (K, PrefValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for ClientPreferences {
    type Item = (String, PrefValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PrefValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_only_overwrites_present_keys() {
        let mut current = ClientPreferences::new();
        current.insert("a", true);
        current.insert("b", 1.0);

        let mut incoming = ClientPreferences::new();
        incoming.insert("b", 2.0);
        incoming.insert("c", PrefValue::Null);

        current.merge(incoming);
        assert_eq!(current.get("a"), Some(&PrefValue::Bool(true)));
        assert_eq!(current.get("b"), Some(&PrefValue::Number(2.0)));
        assert_eq!(current.get("c"), Some(&PrefValue::Null));
    }

    #[test]
    fn remote_preferences_serialize_as_flat_map() {
        let remote: RemotePreferences = [("x", "1"), ("y", "true")].into_iter().collect();
        let json = serde_json::to_string(&remote).unwrap();
        assert_eq!(json, r#"{"x":"1","y":"true"}"#);

        let back: RemotePreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, remote);
    }

    #[test]
    fn remote_preferences_drop_null_entries() {
        let remote: RemotePreferences =
            serde_json::from_str(r#"{"x":"1","gone":null}"#).unwrap();
        assert_eq!(remote.len(), 1);
        assert!(!remote.contains_key("gone"));
    }
}
