//! Ordered, duplicate-free technology labels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The technology tags attached to a project draft.
///
/// Labels keep insertion order. Duplicates are compared case-sensitively
/// after trimming; blank labels are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a label. Returns `false` if it was blank or already present.
    pub fn add(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    /// Remove a label. Returns `false` if it was not present.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != label.trim());
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|existing| existing == label)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for label in iter {
            tags.add(label.as_ref());
        }
        tags
    }
}
