//! Sorted property map for Stanza nodes.
//!
//! [`PropertyMap`] wraps a [`BTreeMap`] whose keys compare
//! case-insensitively while preserving the case they were first inserted
//! with. Iteration is always in ascending key order, regardless of insertion
//! order — a first-class invariant the serializer and matcher rely on.
//!
//! ```rust
//! use stanza::{PropertyMap, Value};
//!
//! let mut props = PropertyMap::new();
//! props.insert("Zeta".to_string(), Value::from(1)).unwrap();
//! props.insert("alpha".to_string(), Value::from(2)).unwrap();
//!
//! let keys: Vec<_> = props.keys().collect();
//! assert_eq!(keys, vec!["alpha", "Zeta"]);
//! assert!(props.get("ZETA").is_some());
//! ```

use crate::error::Result;
use crate::node::validate_name;
use crate::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A property key: case-preserving storage, case-insensitive ordering.
#[derive(Debug, Clone)]
struct PropertyKey(String);

impl PropertyKey {
    fn cmp_chars(&self, other: &Self) -> Ordering {
        self.0
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(other.0.chars().flat_map(char::to_lowercase))
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_chars(other) == Ordering::Equal
    }
}

impl Eq for PropertyKey {}

impl PartialOrd for PropertyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_chars(other)
    }
}

/// The property collection of a [`Node`](crate::Node).
///
/// Keys are unique per node under case-insensitive comparison and iterate in
/// ascending key order. Keys obey the same identifier rules as node names;
/// [`insert`](Self::insert) rejects invalid keys with a construction error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap(BTreeMap<PropertyKey, Value>);

impl PropertyMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        PropertyMap(BTreeMap::new())
    }

    /// Inserts a key-value pair, validating the key.
    ///
    /// If a case-insensitively equal key is already present its value is
    /// replaced (and returned) while the originally stored key case is kept.
    pub fn insert(&mut self, key: String, value: Value) -> Result<Option<Value>> {
        validate_name(&key)?;
        Ok(self.0.insert(PropertyKey(key), value))
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(&PropertyKey(key.to_string()))
    }

    /// Case-insensitive mutable lookup.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(&PropertyKey(key.to_string()))
    }

    /// Removes and returns the value for `key`, case-insensitively.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(&PropertyKey(key.to_string()))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.0.as_str(), v))
    }

    /// Iterates keys in ascending order, with their stored case.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.0.as_str())
    }
}

impl Serialize for PropertyMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_key_iteration_regardless_of_insertion_order() {
        let mut props = PropertyMap::new();
        props.insert("charlie".to_string(), Value::from(3)).unwrap();
        props.insert("alpha".to_string(), Value::from(1)).unwrap();
        props.insert("Bravo".to_string(), Value::from(2)).unwrap();

        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, vec!["alpha", "Bravo", "charlie"]);
    }

    #[test]
    fn test_case_insensitive_lookup_preserves_stored_case() {
        let mut props = PropertyMap::new();
        props.insert("Timeout".to_string(), Value::from(30)).unwrap();

        assert_eq!(props.get("timeout"), Some(&Value::from(30)));
        assert_eq!(props.get("TIMEOUT"), Some(&Value::from(30)));

        let replaced = props.insert("TIMEOUT".to_string(), Value::from(60)).unwrap();
        assert_eq!(replaced, Some(Value::from(30)));
        assert_eq!(props.len(), 1);
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["Timeout"]);
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let mut props = PropertyMap::new();
        props.insert("Key".to_string(), Value::from("x")).unwrap();
        assert_eq!(props.remove("kEy"), Some(Value::from("x")));
        assert!(props.is_empty());
        assert_eq!(props.remove("kEy"), None);
    }

    #[test]
    fn test_insert_rejects_invalid_keys() {
        let mut props = PropertyMap::new();
        assert!(props.insert(String::new(), Value::None).is_err());
        assert!(props.insert("a b".to_string(), Value::None).is_err());
        assert!(props.insert("a=b".to_string(), Value::None).is_err());
    }
}
