//! Sentence-granularity index used for extractive summaries.

use crate::corpus::split_sentences;
use crate::error::Result;
use crate::index::{QueryResult, TermDocIndex};
use crate::stopword::Stopwords;
use crate::tokenizer::SentenceTokenizer;
use crate::unit::{Document, Sentence, TextUnit};

/// Sentences picked for a question, in excerpt order.
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    pub sentences: Vec<QueryResult<'a, Sentence>>,
    /// Total word count of the chosen sentences.
    pub words: usize,
}

impl Summary<'_> {
    pub fn text(&self) -> String {
        self.sentences.iter().map(|r| r.item().content()).collect::<Vec<_>>().join(" ")
    }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

/// Index of every sentence of every added document.
#[derive(Debug, Clone, Default)]
pub struct SentenceIndex {
    index: TermDocIndex<Sentence>,
    tokenizer: SentenceTokenizer,
    documents: usize,
}

impl SentenceIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_tokenizer(tokenizer: SentenceTokenizer) -> Self {
        Self { tokenizer, ..Self::default() }
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.index = self.index.with_stopwords(stopwords);
        self
    }

    /// Split `doc` into sentences and append them. Returns how many were added.
    pub fn add_document(&mut self, doc: &Document) -> usize {
        let sentences = split_sentences(doc, &self.tokenizer);
        let added = sentences.len();
        self.index.extend(sentences);
        self.documents += 1;
        added
    }

    pub fn add_documents<'d, I: IntoIterator<Item = &'d Document>>(&mut self, docs: I) {
        for doc in docs {
            self.add_document(doc);
        }
    }

    pub fn normalize(&mut self) { self.index.normalize() }

    pub fn is_normalized(&self) -> bool { self.index.is_normalized() }

    /// Number of sentences.
    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    pub fn document_count(&self) -> usize { self.documents }

    pub fn index(&self) -> &TermDocIndex<Sentence> { &self.index }

    pub fn tokenizer(&self) -> &SentenceTokenizer { &self.tokenizer }

    /// Sentences ranked by score.
    pub fn query(&self, text: &str, top_k: usize) -> Result<Vec<QueryResult<'_, Sentence>>> {
        self.index.query(text, top_k)
    }

    /// Pick the best-scoring sentences that fit under `word_budget` words.
    ///
    /// Sentences are taken in score order until the next one would bring the
    /// total to the budget or beyond. Sentences scoring 0 are never taken, even
    /// when budget remains, so a summary may stop well short of it. The chosen
    /// sentences are then put back in document and position order.
    pub fn summarize(&self, question: &str, word_budget: usize) -> Result<Summary<'_>> {
        let ranked = self.index.query(question, self.index.len())?;
        let mut words = 0;
        let mut sentences = Vec::new();
        for result in ranked.into_iter().take_while(|r| r.score() > 0.0) {
            let size = result.item().size();
            if words + size >= word_budget {
                break;
            }
            words += size;
            sentences.push(result);
        }
        sentences.sort_by(|a, b| a.item().excerpt_cmp(b.item()));
        Ok(Summary { sentences, words })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;

    fn corpus() -> SentenceIndex {
        let mut idx = SentenceIndex::new();
        idx.add_document(&Document::new("a.txt", "Whales are mammals. Whales breathe air. Fish do not."));
        idx.add_document(&Document::new("b.txt", "Some whales sing. Birds sing too."));
        idx
    }

    #[test]
    fn summarize_requires_normalization() {
        let idx = corpus();
        assert_eq!(idx.summarize("whales", 100).unwrap_err(), IndexError::NotNormalized);
    }

    #[test]
    fn summary_is_in_excerpt_order() {
        let mut idx = corpus();
        idx.normalize();
        let summary = idx.summarize("whales sing", 100).unwrap();
        let order: Vec<(&str, usize)> = summary.sentences.iter().map(|r| (r.item().name(), r.item().pos())).collect();
        assert_eq!(order, vec![("a.txt", 0), ("a.txt", 1), ("b.txt", 0), ("b.txt", 1)]);
        assert_eq!(summary.words, 3 + 3 + 3 + 3);
    }

    #[test]
    fn summary_respects_word_budget() {
        let mut idx = corpus();
        idx.normalize();
        let summary = idx.summarize("whales sing", 7).unwrap();
        assert_eq!(summary.words, 6);
        assert_eq!(summary.sentences.len(), 2);
        assert!(summary.text().contains("Some whales sing."));
    }

    #[test]
    fn unrelated_sentences_do_not_pad_the_budget() {
        let mut idx = corpus();
        idx.normalize();
        let summary = idx.summarize("whales sing", 1000).unwrap();
        assert_eq!(summary.sentences.len(), 4);
        assert!(summary.sentences.iter().all(|r| r.score() > 0.0));
        assert!(!summary.text().contains("Fish do not."));
    }

    #[test]
    fn document_and_sentence_counts() {
        let idx = corpus();
        assert_eq!(idx.document_count(), 2);
        assert_eq!(idx.len(), 5);
    }
}
