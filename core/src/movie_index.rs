//! Movie recommendation by plot-summary similarity.

use crate::error::{IndexError, Result};
use crate::index::{QueryResult, TermDocIndex};
use crate::tokenizer::{Tokenizer, WordTokenizer};
use crate::unit::Movie;

/// Index of movie summaries queried by title.
#[derive(Debug, Clone, Default)]
pub struct MovieIndex {
    index: TermDocIndex<Movie>,
}

impl MovieIndex {
    pub fn new() -> Self { Self::default() }

    pub fn from_movies<I: IntoIterator<Item = Movie>>(movies: I) -> Self {
        Self { index: TermDocIndex::from_items(movies) }
    }

    pub fn append(&mut self, movie: Movie) -> usize { self.index.append(movie) }

    pub fn normalize(&mut self) { self.index.normalize() }

    pub fn is_normalized(&self) -> bool { self.index.is_normalized() }

    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    pub fn index(&self) -> &TermDocIndex<Movie> { &self.index }

    /// Position of the first movie with this exact title.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.index.items().iter().position(|m| m.title() == title)
    }

    pub fn contains_title(&self, title: &str) -> bool { self.position(title).is_some() }

    pub fn summary(&self, title: &str) -> Option<&str> {
        self.position(title).and_then(|i| self.index.get(i)).map(Movie::summary)
    }

    /// Rank all movies against the summary of `title`, keeping `top_k + 1` results.
    ///
    /// The queried movie scores 1.0 against itself and normally comes first, so
    /// callers presenting recommendations skip it (see [`recommend`](Self::recommend)).
    pub fn query(&self, title: &str, top_k: usize) -> Result<Vec<QueryResult<'_, Movie>>> {
        let (_, tokens) = self.resolve(title)?;
        Ok(self.index.rank(&tokens, top_k + 1))
    }

    /// The `top_k` movies most similar to `title`, excluding `title` itself.
    pub fn recommend(&self, title: &str, top_k: usize) -> Result<Vec<QueryResult<'_, Movie>>> {
        let (pos, tokens) = self.resolve(title)?;
        let mut results = self.index.rank(&tokens, top_k + 1);
        results.retain(|r| r.index() != pos);
        results.truncate(top_k);
        Ok(results)
    }

    fn resolve(&self, title: &str) -> Result<(usize, Vec<String>)> {
        if !self.index.is_normalized() {
            return Err(IndexError::NotNormalized);
        }
        let pos = self.position(title).ok_or_else(|| IndexError::ItemNotFound(title.to_string()))?;
        let summary = self.index.items()[pos].summary();
        if summary.trim().is_empty() {
            return Err(IndexError::NoContent(title.to_string()));
        }
        Ok((pos, WordTokenizer::new().tokenize(summary)))
    }
}
