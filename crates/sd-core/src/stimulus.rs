//! `StimulusRegistry` — the ordered vocabulary of stimulus tokens.
//!
//! A stimulus is an opaque, non-empty string.  The registry only enforces
//! uniqueness; token order is insertion order and is visible to authoring
//! tools that address tokens by index.

use std::collections::HashSet;

/// Ordered set of unique, non-empty stimulus tokens.
#[derive(Clone, Debug, Default)]
pub struct StimulusRegistry {
    values: Vec<String>,
    lookup: HashSet<String>,
}

impl StimulusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a token list, skipping empties and duplicates.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for token in tokens {
            registry.add_stimulus(token.as_ref());
        }
        registry
    }

    /// Append `token` to the vocabulary.
    ///
    /// Returns `false` (and changes nothing) if the token is empty or already
    /// registered.
    pub fn add_stimulus(&mut self, token: &str) -> bool {
        if token.is_empty() || self.lookup.contains(token) {
            return false;
        }
        self.lookup.insert(token.to_owned());
        self.values.push(token.to_owned());
        true
    }

    /// `true` if `token` is part of the vocabulary.
    #[inline]
    pub fn is_valid(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    /// Token at insertion position `index`.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Insertion position of `token`.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        if !self.is_valid(token) {
            return None;
        }
        self.values.iter().position(|v| v == token)
    }

    /// Tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    /// Owned copy of the vocabulary, for tooling that must not mutate it.
    pub fn values(&self) -> Vec<String> {
        self.values.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
