use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{AppError, AppResult};

use super::stop_words::is_stop_word;

/// Sparse TF-IDF vector: `(dimension, weight)` pairs in ascending dimension order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from unordered entries, dropping zero weights
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(dim, _)| dim);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_w) = self.entries[i];
            let (b_dim, b_w) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
    }
}

/// Splits text into lowercase terms of at least two word characters,
/// then drops English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Vocabulary and inverse document frequencies learned from a corpus
///
/// Dimensions are assigned in lexicographic term order. The space is fixed once
/// fitted; a changed corpus needs a fresh `fit`.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl VectorSpace {
    /// Learns the vocabulary and smoothed idf, `ln((1 + n) / (1 + df)) + 1`
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> AppResult<Self> {
        if documents.is_empty() {
            return Err(AppError::EmptyCorpus);
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let terms: BTreeSet<&String> = doc_freq.keys().collect();
        let n = documents.len() as f64;

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (dim, term) in terms.into_iter().enumerate() {
            let df = doc_freq[term] as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.clone(), dim);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Fits on `documents` and returns one L2-normalized vector per document
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> AppResult<(Self, Vec<SparseVector>)> {
        let space = Self::fit(documents)?;
        let vectors = documents
            .iter()
            .map(|doc| space.transform(doc.as_ref()))
            .collect();
        Ok((space, vectors))
    }

    /// Weights a document against this space; terms outside the vocabulary are ignored
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in tokenize(document) {
            if let Some(&dim) = self.vocabulary.get(&term) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }

    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    pub fn dimension_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.dimension_of(term).map(|dim| self.idf[dim])
    }
}
