use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::errors::ConfigurationError;

const KIND: &str = "vectorizer";

// Words of two or more word characters.
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// Sparse term-count features, sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(i, v)| weights.get(*i).map(|w| w * v))
            .sum()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Bag-of-words vectorizer with a vocabulary fixed at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    binary: bool,
}

impl CountVectorizer {
    /// Unigram, lowercasing vectorizer; indices follow iteration order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = HashMap::new();
        for term in terms {
            let next = vocabulary.len();
            vocabulary.entry(term.into()).or_insert(next);
        }
        Self {
            vocabulary,
            lowercase: true,
            ngram_range: default_ngram_range(),
            binary: false,
        }
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min, max);
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Width of every feature vector this vectorizer produces.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.vocabulary.is_empty() {
            return Err(ConfigurationError::invalid(KIND, "vocabulary is empty"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ConfigurationError::invalid(
                KIND,
                format!("bad ngram_range ({min_n}, {max_n})"),
            ));
        }
        let mut seen = vec![false; self.vocabulary.len()];
        for (term, &index) in &self.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(ConfigurationError::invalid(
                        KIND,
                        format!("term '{term}' has duplicate or out-of-range index {index}"),
                    ));
                }
            }
        }
        Ok(())
    }

    fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn transform(&self, sentence: &str) -> FeatureVector {
        let text = if self.lowercase {
            sentence.to_lowercase()
        } else {
            sentence.to_string()
        };
        let tokens = self.tokens(&text);
        let (min_n, max_n) = self.ngram_range;

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for n in min_n.max(1)..=max_n {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_default() += 1.0;
                }
            }
        }
        if self.binary {
            counts.values_mut().for_each(|v| *v = 1.0);
        }

        FeatureVector {
            entries: counts.into_iter().collect(),
        }
    }

    /// Vectorize a whole collection at once; output order matches input.
    pub fn transform_batch(&self, sentences: &[&str]) -> Vec<FeatureVector> {
        sentences.par_iter().map(|s| self.transform(s)).collect()
    }
}
