//! Turning raw `(identifier, text)` sources into text units.

use crate::index::TermDocIndex;
use crate::tokenizer::{SentenceTokenizer, Tokenizer};
use crate::unit::{Document, Movie, Sentence, TextUnit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata row joined to a plot summary by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMeta {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
}

/// Split a document into positioned sentences.
pub fn split_sentences(doc: &Document, tokenizer: &SentenceTokenizer) -> Vec<Sentence> {
    tokenizer
        .tokenize(doc.content())
        .into_iter()
        .enumerate()
        .map(|(pos, text)| Sentence::new(doc.name(), text, pos))
        .collect()
}

/// Ordered collection of text units waiting to be indexed.
#[derive(Debug, Clone)]
pub struct CorpusBuilder<T> {
    units: Vec<T>,
}

impl<T> Default for CorpusBuilder<T> {
    fn default() -> Self { Self { units: Vec::new() } }
}

impl<T: TextUnit> CorpusBuilder<T> {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, unit: T) -> &mut Self {
        self.units.push(unit);
        self
    }

    pub fn len(&self) -> usize { self.units.len() }

    pub fn is_empty(&self) -> bool { self.units.is_empty() }

    pub fn build(self) -> Vec<T> { self.units }

    /// Index every unit in insertion order. The result still needs normalizing.
    pub fn into_index(self) -> TermDocIndex<T> {
        let index = TermDocIndex::from_items(self.units);
        tracing::info!(items = index.len(), terms = index.term_count(), "corpus indexed");
        index
    }
}

impl CorpusBuilder<Document> {
    pub fn add_source(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.push(Document::new(id, text))
    }

    pub fn from_sources<I, K, V>(sources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Self::new();
        for (id, text) in sources {
            builder.add_source(id, text);
        }
        builder
    }
}

impl CorpusBuilder<Sentence> {
    pub fn add_document(&mut self, doc: &Document, tokenizer: &SentenceTokenizer) -> &mut Self {
        self.units.extend(split_sentences(doc, tokenizer));
        self
    }
}

impl CorpusBuilder<Movie> {
    /// Join summaries to metadata by id, keeping summary order.
    ///
    /// Summaries without a metadata row are dropped.
    pub fn from_movie_sources<S, M, K, V>(summaries: S, metadata: M) -> Self
    where
        S: IntoIterator<Item = (K, V)>,
        M: IntoIterator<Item = MovieMeta>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut meta: HashMap<String, MovieMeta> = metadata.into_iter().map(|m| (m.id.clone(), m)).collect();
        let mut builder = Self::new();
        let mut skipped = 0usize;
        for (id, summary) in summaries {
            let id: String = id.into();
            match meta.remove(&id) {
                Some(m) => {
                    builder.push(Movie::new(id, m.title, summary, m.release_date));
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "summaries without metadata");
        }
        builder
    }
}
