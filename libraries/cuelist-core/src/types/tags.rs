//! Tag set handling
//!
//! A playlist always carries at least one tag. When the user supplies none,
//! the set holds the single `UNTAGGED` sentinel instead of being empty, so
//! tag-based filtering never has to special-case playlists without tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel tag applied to playlists the user left untagged
pub const UNTAGGED: &str = "untagged";

/// Ordered, de-duplicated, never-empty set of tag names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// The set holding only the `UNTAGGED` sentinel
    pub fn untagged() -> Self {
        Self(vec![UNTAGGED.to_string()])
    }

    /// Parse free-text tag input.
    ///
    /// Splits on commas, trims each entry, drops empties, removes duplicates
    /// preserving first occurrence. An input that yields nothing becomes the
    /// `UNTAGGED` sentinel set.
    pub fn parse(text: &str) -> Self {
        Self::from_tags(text.split(',').map(str::to_string))
    }

    /// Build a set from pre-split tag names, applying the same normalization
    /// as [`TagSet::parse`].
    pub fn from_tags(tags: impl IntoIterator<Item = String>) -> Self {
        let mut names: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.trim();
            if tag.is_empty() || names.iter().any(|t| t == tag) {
                continue;
            }
            names.push(tag.to_string());
        }
        if names.is_empty() {
            return Self::untagged();
        }
        Self(names)
    }

    /// Tag names in insertion order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the set is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// True when the set is exactly the `UNTAGGED` sentinel
    pub fn is_untagged(&self) -> bool {
        self.0.len() == 1 && self.0[0] == UNTAGGED
    }

    /// The set with `tag` removed. Removing the last real tag yields the
    /// `UNTAGGED` sentinel set, never an empty one.
    pub fn without(&self, tag: &str) -> Self {
        let remaining: Vec<String> = self.0.iter().filter(|t| *t != tag).cloned().collect();
        if remaining.is_empty() {
            return Self::untagged();
        }
        Self(remaining)
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
