use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ClassifierError;

/// One taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationNode {
    /// Dotted numeric code, e.g. "62.01"
    pub code: String,
    /// Display label
    pub name: String,
    /// Nested entries (the `items` field of the taxonomy JSON)
    #[serde(
        rename = "items",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<ClassificationNode>,
}

impl ClassificationNode {
    /// Create a leaf node
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Attach child nodes
    pub fn with_children(mut self, children: Vec<ClassificationNode>) -> Self {
        self.children = children;
        self
    }

    /// Code with every `.` separator removed
    pub fn bare_code(&self) -> String {
        self.code.replace('.', "")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ClassificationNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<ClassificationNode>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A Russian phone number in canonical `+7XXXXXXXXXX` form.
///
/// Only produced by [`crate::normalize`], so the 11-digit invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    /// Wrap 11 digits that already start with `7`
    pub(crate) fn from_digits(digits: &str) -> Self {
        debug_assert!(digits.len() == 11 && digits.starts_with('7'));
        Self(format!("+{}", digits))
    }

    /// Canonical form with the leading `+`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 11 digits without `+`; this is what codes are matched against
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NormalizedPhone {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::normalize::normalize(s).ok_or_else(|| ClassifierError::InvalidPhone(s.to_string()))
    }
}

/// Code matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Bare code must be a suffix of the phone digits
    Exact,
    /// Bare code may occur anywhere in the phone digits
    Fallback,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => f.write_str("exact"),
            MatchMode::Fallback => f.write_str("fallback"),
        }
    }
}

/// Accumulated matches of one classification run: dotted code -> name, ordered by code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    entries: BTreeMap<String, String>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match, returning the previous name if the code was already present
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.entries.insert(code.into(), name.into())
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Merge another set into this one; colliding codes take the other set's name
    pub fn merge(&mut self, other: MatchSet) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl IntoIterator for MatchSet {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Final answer of the exact-then-fallback policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Mode of the last pass that ran
    pub mode: MatchMode,
    /// Matched codes; empty means no classification found
    pub matches: MatchSet,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
