//! Term-document index with log-weighted TF-IDF and cosine ranking.
//!
//! The index keeps, for every term, one raw frequency and one weight per item.
//! Both vectors always have exactly [`TermDocIndex::len`] slots. Weights are
//! only meaningful after [`TermDocIndex::normalize`]; any append clears the
//! normalized flag and queries fail with [`IndexError::NotNormalized`] until the
//! next weighting pass.

use crate::config::DEFAULT_DOCUMENT_RESULTS;
use crate::error::{IndexError, Result};
use crate::stopword::Stopwords;
use crate::tokenizer::{Tokenizer, WordTokenizer};
use crate::unit::{Document, TextUnit};
use std::collections::HashMap;

/// Per-term frequency and weight vectors, one slot per indexed item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVectors {
    pub freqs: Vec<u32>,
    pub weights: Vec<f64>,
}

impl TermVectors {
    fn zeroed(len: usize) -> Self {
        Self { freqs: vec![0; len], weights: vec![0.0; len] }
    }

    fn grow(&mut self) {
        self.freqs.push(0);
        self.weights.push(0.0);
    }

    /// Number of items with a nonzero count.
    pub fn item_freq(&self) -> usize {
        self.freqs.iter().filter(|&&f| f > 0).count()
    }
}

/// `1 + ln(tf)` floored at zero, with `tf == 0` mapped to 0.
pub fn tf_weight(tf: u32) -> f64 {
    if tf == 0 {
        return 0.0;
    }
    (1.0 + f64::from(tf).ln()).max(0.0)
}

/// `ln(n / df)`, or 0 when the term occurs nowhere.
pub fn idf_weight(n: usize, df: usize) -> f64 {
    if df == 0 {
        return 0.0;
    }
    (n as f64 / df as f64).ln()
}

/// Cosine of two weight vectors given as aligned `(query, item)` pairs.
///
/// Returns 0 when either side has zero magnitude.
pub fn cosine_similarity<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (mut num, mut len1, mut len2) = (0.0f64, 0.0f64, 0.0f64);
    for (q, d) in pairs {
        num += q * d;
        len1 += q * q;
        len2 += d * d;
    }
    if len1 == 0.0 || len2 == 0.0 {
        return 0.0;
    }
    (num / (len1.sqrt() * len2.sqrt())).clamp(0.0, 1.0)
}

/// A scored reference to an item owned by the index that produced it.
#[derive(Debug)]
pub struct QueryResult<'a, T> {
    index: usize,
    item: &'a T,
    score: f64,
}

impl<T> Clone for QueryResult<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for QueryResult<'_, T> {}

impl<'a, T> QueryResult<'a, T> {
    pub fn index(&self) -> usize { self.index }
    pub fn item(&self) -> &'a T { self.item }
    pub fn score(&self) -> f64 { self.score }
}

/// Generic inverted index over any [`TextUnit`].
#[derive(Debug, Clone)]
pub struct TermDocIndex<T> {
    items: Vec<T>,
    terms: HashMap<String, TermVectors>,
    stopwords: Stopwords,
    normalized: bool,
}

impl<T> Default for TermDocIndex<T> {
    fn default() -> Self {
        Self { items: Vec::new(), terms: HashMap::new(), stopwords: Stopwords::default(), normalized: false }
    }
}

/// Whole-document search index.
pub type DocumentIndex = TermDocIndex<Document>;

impl<T: TextUnit> TermDocIndex<T> {
    pub fn new() -> Self { Self::default() }

    /// Build an un-normalized index from `items`, in order.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut index = Self::new();
        index.extend(items);
        index
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn stopwords(&self) -> &Stopwords { &self.stopwords }

    /// Add one item and return its position. Invalidates normalization.
    pub fn append(&mut self, item: T) -> usize {
        self.normalized = false;
        let slot = self.items.len();
        for vectors in self.terms.values_mut() {
            vectors.grow();
        }
        for (term, count) in item.terms().iter() {
            let vectors = self
                .terms
                .entry(term.to_string())
                .or_insert_with(|| TermVectors::zeroed(slot + 1));
            vectors.freqs[slot] = count;
        }
        self.items.push(item);
        slot
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.append(item);
        }
    }

    /// Recompute every stored weight from the current frequencies.
    pub fn normalize(&mut self) {
        let n = self.items.len();
        for vectors in self.terms.values_mut() {
            let idf = idf_weight(n, vectors.item_freq());
            vectors.weights = vectors.freqs.iter().map(|&tf| tf_weight(tf) * idf).collect();
        }
        self.normalized = true;
        tracing::debug!(items = n, terms = self.terms.len(), "index normalized");
    }

    pub fn is_normalized(&self) -> bool { self.normalized }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn items(&self) -> &[T] { &self.items }

    pub fn get(&self, i: usize) -> Option<&T> { self.items.get(i) }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize { self.terms.len() }

    pub fn contains(&self, term: &str) -> bool { self.terms.contains_key(term) }

    pub fn item_freq(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, TermVectors::item_freq)
    }

    pub fn term_freq(&self, term: &str, i: usize) -> Result<u32> {
        let item = self.check(i)?;
        Ok(item.term_freq(term))
    }

    pub fn norm_tf(&self, term: &str, i: usize) -> Result<f64> {
        let tf = self.term_freq(term, i)?;
        Ok(if self.contains(term) { tf_weight(tf) } else { 0.0 })
    }

    pub fn norm_idf(&self, term: &str) -> f64 {
        idf_weight(self.items.len(), self.item_freq(term))
    }

    /// TF-IDF weight computed from the current frequencies.
    pub fn weight(&self, term: &str, i: usize) -> Result<f64> {
        let tf = self.norm_tf(term, i)?;
        Ok(if self.contains(term) { tf * self.norm_idf(term) } else { 0.0 })
    }

    /// Weight stored by the last [`normalize`](Self::normalize), 0 for unknown terms.
    pub fn stored_weight(&self, term: &str, i: usize) -> Result<f64> {
        self.check(i)?;
        Ok(self.terms.get(term).map_or(0.0, |v| v.weights[i]))
    }

    pub fn term_vectors(&self, term: &str) -> Option<&TermVectors> { self.terms.get(term) }

    /// Every indexed term, sorted.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.terms.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    /// Sorted terms with stopwords removed, for reports.
    pub fn reportable_terms(&self) -> Vec<&str> {
        self.vocabulary().into_iter().filter(|t| !self.stopwords.contains(t)).collect()
    }

    /// Rank every item against free text and keep the best `top_k`.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult<'_, T>>> {
        if !self.normalized {
            return Err(IndexError::NotNormalized);
        }
        let tokens = WordTokenizer::new().tokenize(text);
        Ok(self.rank(&tokens, top_k))
    }

    /// Score every item against already tokenized query terms.
    ///
    /// Only query terms take part in the cosine, once per occurrence, so a
    /// repeated word counts again on top of its raised tf. Ties keep index order.
    pub(crate) fn rank(&self, tokens: &[String], top_k: usize) -> Vec<QueryResult<'_, T>> {
        let query = self.query_weights(tokens);
        let mut results: Vec<QueryResult<'_, T>> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let pairs = query.iter().map(|(vectors, weight)| (*weight, vectors.map_or(0.0, |v| v.weights[i])));
                QueryResult { index: i, item, score: cosine_similarity(pairs) }
            })
            .collect();
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        results
    }

    /// One `(vectors, query weight)` entry per non-empty token, in query order.
    fn query_weights(&self, tokens: &[String]) -> Vec<(Option<&TermVectors>, f64)> {
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).filter(|t| !t.is_empty()).collect();
        let mut freqs: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            *freqs.entry(*token).or_default() += 1;
        }
        let weights: HashMap<&str, f64> =
            freqs.into_iter().map(|(term, freq)| (term, tf_weight(freq) * self.norm_idf(term))).collect();
        tokens
            .into_iter()
            .map(|term| (self.terms.get(term), weights.get(term).copied().unwrap_or_default()))
            .collect()
    }

    fn check(&self, i: usize) -> Result<&T> {
        self.items.get(i).ok_or(IndexError::OutOfRange { index: i, len: self.items.len() })
    }
}

impl TermDocIndex<Document> {
    /// Free-text search with the default result count.
    pub fn search(&self, text: &str) -> Result<Vec<QueryResult<'_, Document>>> {
        self.query(text, DEFAULT_DOCUMENT_RESULTS)
    }
}
