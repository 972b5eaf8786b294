//! Collapse the candidate pool to unique sentences.

use std::collections::HashSet;

use crate::segmenter::Sentence;

/// Distinct sentences in first-seen order.
///
/// Equality is exact: case-sensitive, no normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueSentenceSet {
    ordered: Vec<Sentence>,
    seen: HashSet<String>,
}

impl UniqueSentenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pool(pool: impl IntoIterator<Item = Sentence>) -> Self {
        let mut set = Self::new();
        for sentence in pool {
            set.insert(sentence);
        }
        set
    }

    /// Returns `false` when an equal sentence is already present.
    pub fn insert(&mut self, sentence: Sentence) -> bool {
        if self.seen.contains(sentence.as_str()) {
            return false;
        }
        self.seen.insert(sentence.as_str().to_string());
        self.ordered.push(sentence);
        true
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.seen.contains(sentence)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.ordered.iter()
    }

    pub fn as_slice(&self) -> &[Sentence] {
        &self.ordered
    }
}

impl<'a> IntoIterator for &'a UniqueSentenceSet {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl IntoIterator for UniqueSentenceSet {
    type Item = Sentence;
    type IntoIter = std::vec::IntoIter<Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

impl FromIterator<Sentence> for UniqueSentenceSet {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self::from_pool(iter)
    }
}
