//! Small-scale information retrieval: log-weighted TF-IDF with cosine ranking
//! over documents, sentences, or movie plot summaries.

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;
pub mod movie_index;
pub mod sentence_index;
pub mod source;
pub mod stopword;
pub mod tokenizer;
pub mod unit;

pub use corpus::{CorpusBuilder, MovieMeta};
pub use error::IndexError;
pub use index::{DocumentIndex, QueryResult, TermDocIndex, TermVectors};
pub use movie_index::MovieIndex;
pub use sentence_index::{SentenceIndex, Summary};
pub use stopword::Stopwords;
pub use tokenizer::{SentenceTokenizer, Tokenizer, WordTokenizer};
pub use unit::{Document, Movie, Sentence, TermCounts, TextUnit};
