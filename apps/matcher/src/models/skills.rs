use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Unique lowercase skills found in (or recorded for) one candidate.
///
/// Immutable once built. Iteration is lexicographic so serialized output is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkillSet(BTreeSet<String>);

impl ExtractedSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_normalized(skills: BTreeSet<String>) -> Self {
        ExtractedSkillSet(skills)
    }

    /// Case-insensitive membership.
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(&skill.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

/// Builds a set from caller-supplied skills (e.g. a stored profile),
/// lowercasing and trimming each and dropping blanks.
impl<S: AsRef<str>> FromIterator<S> for ExtractedSkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ExtractedSkillSet(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ExtractedSkillSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
