//! Loading corpus inputs from disk.
//!
//! A source that cannot be opened is treated as empty: the loaders log a
//! warning and return no items rather than failing the whole pipeline.

use crate::corpus::MovieMeta;
use crate::stopword::Stopwords;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read '{path}'")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a whole text source.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String, SourceError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| SourceError::Unavailable { path: path.to_path_buf(), source })
}

fn read_or_empty(path: &Path) -> String {
    match read_source(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "source unavailable, using empty input");
            String::new()
        }
    }
}

/// Read a listing of whitespace-separated document paths and load each one.
///
/// Returns `(path, text)` pairs in listing order; unreadable documents are skipped.
pub fn load_document_listing<P: AsRef<Path>>(listing: P) -> Vec<(String, String)> {
    let listing = listing.as_ref();
    let mut docs = Vec::new();
    for doc_path in read_or_empty(listing).split_whitespace() {
        match read_source(doc_path) {
            Ok(text) => docs.push((doc_path.to_string(), text)),
            Err(err) => tracing::warn!(path = doc_path, error = %err, "skipping unreadable document"),
        }
    }
    tracing::info!(listing = %listing.display(), documents = docs.len(), "loaded document listing");
    docs
}

/// Whitespace-separated words from a file, such as an abbreviation list.
pub fn load_word_list<P: AsRef<Path>>(path: P) -> Vec<String> {
    read_or_empty(path.as_ref()).split_whitespace().map(str::to_string).collect()
}

pub fn load_stopwords<P: AsRef<Path>>(path: P) -> Stopwords {
    Stopwords::new(load_word_list(path))
}

/// Parse `id<TAB>summary` lines. Blank or malformed lines are ignored.
pub fn parse_movie_summaries(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (id, summary) = line.split_once('\t')?;
            let id = id.trim();
            (!id.is_empty()).then(|| (id.to_string(), summary.trim().to_string()))
        })
        .collect()
}

/// Parse `id<TAB>external id<TAB>title<TAB>release date<TAB>...` lines.
pub fn parse_movie_metadata(text: &str) -> Vec<MovieMeta> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let id = fields.next()?.trim();
            let _external = fields.next()?;
            let title = fields.next()?.trim();
            let release_date = fields.next().map(str::trim).filter(|d| !d.is_empty()).map(str::to_string);
            (!id.is_empty()).then(|| MovieMeta { id: id.to_string(), title: title.to_string(), release_date })
        })
        .collect()
}

pub fn load_movie_summaries<P: AsRef<Path>>(path: P) -> Vec<(String, String)> {
    parse_movie_summaries(&read_or_empty(path.as_ref()))
}

pub fn load_movie_metadata<P: AsRef<Path>>(path: P) -> Vec<MovieMeta> {
    parse_movie_metadata(&read_or_empty(path.as_ref()))
}
