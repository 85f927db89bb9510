//! Indexable text units: whole documents, sentences, and movie plot summaries.
//!
//! Every unit owns a [`TermCounts`] table that is filled once at construction
//! time and never shrinks afterwards.

use crate::tokenizer::{Tokenizer, WordTokenizer};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Term → raw count table for a single unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermCounts {
    counts: BTreeMap<String, u32>,
    total: usize,
    longest: usize,
}

impl TermCounts {
    pub fn new() -> Self { Self::default() }

    /// Count every token of `text` produced by the word tokenizer.
    pub fn from_text(text: &str) -> Self {
        let mut counts = Self::new();
        for token in WordTokenizer::new().tokenize(text) {
            counts.insert(&token);
        }
        counts
    }

    /// Add one occurrence of `term`. Empty terms are ignored.
    pub fn insert(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        match self.counts.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(term.to_string(), 1);
                self.longest = self.longest.max(term.chars().count());
            }
        }
        self.total += 1;
    }

    pub fn contains(&self, term: &str) -> bool { self.counts.contains_key(term) }

    pub fn get(&self, term: &str) -> u32 { self.counts.get(term).copied().unwrap_or(0) }

    /// Iterate `(term, count)` pairs in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Number of tokens counted, duplicates included.
    pub fn total(&self) -> usize { self.total }

    /// Length in characters of the longest distinct term.
    pub fn longest(&self) -> usize { self.longest }
}

/// Capabilities shared by anything the index can score.
pub trait TextUnit {
    /// Display name: a file path, an owning document, or a movie title.
    fn name(&self) -> &str;
    fn content(&self) -> &str;
    fn terms(&self) -> &TermCounts;

    fn contains(&self, term: &str) -> bool { self.terms().contains(term) }

    fn term_freq(&self, term: &str) -> u32 { self.terms().get(term) }

    /// Number of words in the unit.
    fn size(&self) -> usize { self.terms().total() }
}

/// A whole text file (or any free-standing blob) identified by name.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    name: String,
    content: String,
    terms: TermCounts,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let terms = TermCounts::from_text(&content);
        Self { name: name.into(), content, terms }
    }

    /// Name with any leading directories removed, for compact display.
    pub fn short_name(&self) -> &str {
        self.name.rsplit(['/', '\\']).next().unwrap_or(&self.name)
    }

    pub fn longest_term(&self) -> usize { self.terms.longest() }
}

impl TextUnit for Document {
    fn name(&self) -> &str { &self.name }
    fn content(&self) -> &str { &self.content }
    fn terms(&self) -> &TermCounts { &self.terms }
}

/// A sentence taken from a document, remembered by its 0-based position.
#[derive(Debug, Clone, Serialize)]
pub struct Sentence {
    doc: String,
    content: String,
    pos: usize,
    terms: TermCounts,
}

impl Sentence {
    pub fn new(doc: impl Into<String>, content: impl Into<String>, pos: usize) -> Self {
        let content = content.into();
        let terms = TermCounts::from_text(&content);
        Self { doc: doc.into(), content, pos, terms }
    }

    pub fn pos(&self) -> usize { self.pos }

    /// 1 if this sentence contains `term`, else 0.
    pub fn item_freq(&self, term: &str) -> u32 { u32::from(self.contains(term)) }

    pub fn norm_tf(&self, term: &str) -> f64 {
        match self.term_freq(term) {
            0 => 0.0,
            tf => (1.0 + f64::from(tf).ln()).max(0.0),
        }
    }

    /// Inverse frequency computed against this sentence alone.
    ///
    /// Always `ln(1) = 0` for a contained term; cross-sentence idf lives in
    /// [`crate::SentenceIndex`].
    pub fn norm_idf(&self, term: &str) -> f64 {
        match self.item_freq(term) {
            0 => 0.0,
            df => (1.0 / f64::from(df)).ln(),
        }
    }

    pub fn weight(&self, term: &str) -> f64 {
        if self.contains(term) { self.norm_tf(term) * self.norm_idf(term) } else { 0.0 }
    }

    /// Excerpt order: owning document name first, then position.
    pub fn excerpt_cmp(&self, other: &Self) -> Ordering {
        self.doc.cmp(&other.doc).then(self.pos.cmp(&other.pos))
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool { self.doc == other.doc && self.pos == other.pos }
}

impl Eq for Sentence {}

impl TextUnit for Sentence {
    fn name(&self) -> &str { &self.doc }
    fn content(&self) -> &str { &self.content }
    fn terms(&self) -> &TermCounts { &self.terms }
}

/// A plot summary bound to its external id, title, and release date.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    id: String,
    release_date: Option<String>,
    doc: Document,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        release_date: Option<String>,
    ) -> Self {
        Self { id: id.into(), release_date, doc: Document::new(title, summary) }
    }

    pub fn id(&self) -> &str { &self.id }

    pub fn title(&self) -> &str { self.doc.name() }

    pub fn summary(&self) -> &str { self.doc.content() }

    pub fn release_date(&self) -> Option<&str> { self.release_date.as_deref() }
}

impl TextUnit for Movie {
    fn name(&self) -> &str { self.doc.name() }
    fn content(&self) -> &str { self.doc.content() }
    fn terms(&self) -> &TermCounts { self.doc.terms() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_counts_terms() {
        let d = Document::new("files/a.txt", "The cat saw the other cat.");
        assert_eq!(d.term_freq("cat"), 2);
        assert_eq!(d.term_freq("the"), 2);
        assert_eq!(d.term_freq("dog"), 0);
        assert_eq!(d.size(), 6);
        assert_eq!(d.short_name(), "a.txt");
        assert_eq!(d.longest_term(), 5);
    }

    #[test]
    fn empty_tokens_are_not_counted() {
        let d = Document::new("x", "... !!! word");
        assert_eq!(d.terms().len(), 1);
        assert_eq!(d.size(), 1);
    }

    #[test]
    fn sentence_standalone_weights_are_degenerate() {
        let s = Sentence::new("doc", "Rain rain go away.", 3);
        assert_eq!(s.pos(), 3);
        assert_eq!(s.item_freq("rain"), 1);
        assert_eq!(s.item_freq("sun"), 0);
        assert!((s.norm_tf("rain") - (1.0 + 2f64.ln())).abs() < 1e-12);
        assert_eq!(s.norm_idf("rain"), 0.0);
        assert_eq!(s.weight("rain"), 0.0);
        assert_eq!(s.weight("sun"), 0.0);
    }

    #[test]
    fn sentences_order_by_document_then_position() {
        let a1 = Sentence::new("a", "x", 1);
        let a0 = Sentence::new("a", "y", 0);
        let b0 = Sentence::new("b", "z", 0);
        assert_eq!(a0.excerpt_cmp(&a1), Ordering::Less);
        assert_eq!(a1.excerpt_cmp(&b0), Ordering::Less);
        assert_eq!(a1, Sentence::new("a", "other text", 1));
    }

    #[test]
    fn movie_delegates_to_summary_document() {
        let m = Movie::new("42", "Heat", "A heist in Los Angeles.", Some("1995".into()));
        assert!(m.contains("heist"));
        assert!(!m.contains("heat"));
        assert_eq!(m.size(), 5);
        assert_eq!(m.title(), "Heat");
        assert_eq!(m.release_date(), Some("1995"));
    }
}
