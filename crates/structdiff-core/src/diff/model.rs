//! Diff output types.
//!
//! A [`DiffMap`] is ordered lexicographically by key path and serialises as
//! a plain JSON object of key path to [`DiffEntry`].

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Key path segment for a mapping key.
///
/// `.` and `\` inside the key are escaped with `\`, so a key such as `a.b`
/// never shares a key path with the nested path `a` then `b`.
pub fn escape_key_segment(key: &str) -> Cow<'_, str> {
    if !key.contains(['.', '\\']) {
        return Cow::Borrowed(key);
    }
    let mut escaped = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c == '.' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Classification of a single difference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    /// Both values present and unequal
    Updated,
    /// Value present in original only
    Removed,
    /// Sequence lengths differ; `original`/`current` hold the two lengths
    Count,
}

impl ChangeKind {
    /// Upper-case marker used in text output
    pub fn marker(&self) -> &'static str {
        match self {
            ChangeKind::Updated => "UPDATED",
            ChangeKind::Removed => "REMOVED",
            ChangeKind::Count => "COUNT",
        }
    }
}

/// One difference, addressed by its key path in the enclosing [`DiffMap`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: ChangeKind,
    /// Representation of the original value
    pub original: String,
    /// Representation of the current value; empty when removed
    pub current: String,
}

impl DiffEntry {
    pub fn updated(original: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Updated,
            original: original.into(),
            current: current.into(),
        }
    }

    pub fn removed(original: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            original: original.into(),
            current: String::new(),
        }
    }

    pub fn count(original_len: usize, current_len: usize) -> Self {
        Self {
            kind: ChangeKind::Count,
            original: original_len.to_string(),
            current: current_len.to_string(),
        }
    }
}

/// Ordered map from key path to difference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DiffMap {
    entries: BTreeMap<String, DiffEntry>,
}

impl DiffMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a difference, replacing any entry at the same key path
    pub fn insert(&mut self, key: impl Into<String>, entry: DiffEntry) -> Option<DiffEntry> {
        self.entries.insert(key.into(), entry)
    }

    /// Merge a sub-result into this map
    pub fn merge(&mut self, other: DiffMap) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&DiffEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DiffEntry> {
        self.entries.iter()
    }

    /// Entries whose key path lies under `prefix` (the prefix itself included)
    pub fn subtree<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a DiffEntry)> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .filter(move |(k, _)| {
                k.len() == prefix.len() || prefix.is_empty() || k[prefix.len()..].starts_with('.')
            })
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, DiffEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a DiffMap {
    type Item = (&'a String, &'a DiffEntry);
    type IntoIter = btree_map::Iter<'a, String, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for DiffMap {
    type Item = (String, DiffEntry);
    type IntoIter = btree_map::IntoIter<String, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, DiffEntry)> for DiffMap {
    fn from_iter<I: IntoIterator<Item = (String, DiffEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
