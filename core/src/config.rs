//! Default tuning values shared by the library and its front ends.
//!
//! Runtime configuration (file paths, result counts, bind address) is handled by
//! the CLI and server argument parsers; these constants are their defaults.

/// Characters that end a sentence.
pub const DEFAULT_TERMINATORS: &str = ".?!";

/// Number of results returned by a document search.
pub const DEFAULT_DOCUMENT_RESULTS: usize = 10;

/// Number of recommendations returned for a movie title.
pub const DEFAULT_MOVIE_RESULTS: usize = 5;

/// Word budget for an extractive summary.
pub const DEFAULT_SUMMARY_WORDS: usize = 500;
