//! The dictionary payload: insertion-ordered key/value pairs.

use crate::variant::Variant;

/// An insertion-ordered dictionary with unique string keys.
///
/// Keys compare case-sensitively. Inserting an existing key replaces the
/// value in place, keeping the key's original position; when a dictionary
/// is built from pairs that repeat a key, the first writer wins and later
/// pairs are dropped. Equality is order-insensitive.
#[derive(Clone, Debug, Default)]
pub struct Dict {
    entries: Vec<(String, Variant)>,
}

impl Dict {
    pub fn new() -> Self {
        Dict::default()
    }

    /// Build from pairs; on a repeated key the first pair wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Variant)>) -> Self {
        let mut dict = Dict::new();
        for (key, value) in pairs {
            if !dict.contains_key(&key) {
                dict.entries.push((key, value));
            }
        }
        dict
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Insert or replace in place, preserving an existing key's position.
    pub fn insert(&mut self, key: String, value: Variant) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Variant> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Dict {
    /// Order-insensitive: two dictionaries are equal when they hold the
    /// same key/value associations.
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(String, Variant)> for Dict {
    fn from_iter<T: IntoIterator<Item = (String, Variant)>>(iter: T) -> Self {
        Dict::from_pairs(iter)
    }
}
