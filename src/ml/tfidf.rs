//! TF-IDF text vectorizer.
//!
//! Unigram + bigram term counts weighted by smoothed inverse document
//! frequency, L2-normalized per document. The learned vocabulary is capped
//! at a fixed number of terms, keeping the highest corpus-frequency terms.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Vocabulary cap per vectorizer.
pub const MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index within this vectorizer's block.
    vocabulary: HashMap<String, usize>,
    /// Smoothed idf weight per column.
    idf: Vec<f64>,
}

/// Lowercased alphanumeric runs of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in lower.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
        } else if !current.is_empty() {
            if current.chars().count() >= 2 {
                tokens.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.chars().count() >= 2 {
        tokens.push(current);
    }
    tokens
}

/// Unigrams plus adjacent-pair bigrams (joined with a single space).
fn ngrams(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::with_capacity(tokens.len() * 2);
    for window in tokens.windows(2) {
        terms.push(format!("{} {}", window[0], window[1]));
    }
    terms.extend(tokens);
    terms
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from a document corpus.
    pub fn fit(documents: &[&str]) -> Self {
        let n_docs = documents.len();
        let mut corpus_freq: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u64> = HashMap::new();

        for doc in documents {
            let terms = ngrams(doc);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_freq.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Keep the most frequent terms; ties break alphabetically so the
        // vocabulary is deterministic across runs.
        let mut ranked: Vec<(String, u64)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_FEATURES);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (index, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    /// Number of columns this vectorizer contributes.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Dense tf-idf vector for one document. Terms outside the vocabulary
    /// are ignored; an all-unknown document maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dimension()];
        for term in ngrams(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                vector[index] += self.idf[index];
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}
