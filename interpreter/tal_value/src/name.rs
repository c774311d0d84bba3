//! Case-insensitive names for variables and handlers.
//!
//! Tal scripts never distinguish `myVar` from `MYVAR`: every named binding
//! in the scope store is keyed case-insensitively, while the spelling the
//! script author used is preserved for display.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A variable or handler name.
///
/// Equality and hashing are case-insensitive (Unicode simple lowercase
/// folding); the original spelling is kept and returned by [`VarName::as_str`].
///
/// The folded form is computed once at construction so that map lookups do
/// not re-fold on every hash.
#[derive(Clone)]
pub struct VarName {
    spelling: String,
    folded: String,
}

impl VarName {
    /// Create a name, preserving the given spelling.
    pub fn new(spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        let folded = spelling.to_lowercase();
        VarName { spelling, folded }
    }

    /// The spelling this name was created with.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.spelling
    }

    /// The case-folded key form used for equality and hashing.
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for VarName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for VarName {}

impl Hash for VarName {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Debug for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VarName").field(&self.spelling).finish()
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling)
    }
}

impl From<&str> for VarName {
    fn from(s: &str) -> Self {
        VarName::new(s)
    }
}

impl From<String> for VarName {
    fn from(s: String) -> Self {
        VarName::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_case_variants_are_equal() {
        assert_eq!(VarName::new("theAnswer"), VarName::new("THEANSWER"));
        assert_eq!(VarName::new("x"), VarName::new("X"));
    }

    #[test]
    fn test_spelling_is_preserved() {
        let n = VarName::new("myVar");
        assert_eq!(n.as_str(), "myVar");
        assert_eq!(n.to_string(), "myVar");
        assert_eq!(n.folded(), "myvar");
    }

    #[test]
    fn test_case_variants_hash_to_same_bucket() {
        let mut map: FxHashMap<VarName, i32> = FxHashMap::default();
        map.insert(VarName::new("Counter"), 1);
        assert_eq!(map.get(&VarName::new("counter")), Some(&1));
        assert_eq!(map.get(&VarName::new("COUNTER")), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_distinct_names_differ() {
        assert_ne!(VarName::new("foo"), VarName::new("bar"));
    }
}
