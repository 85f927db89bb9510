use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::HeaderMap, routing::{get, post}, Json, Router};
use lexis_core::config::{DEFAULT_DOCUMENT_RESULTS, DEFAULT_MOVIE_RESULTS, DEFAULT_SUMMARY_WORDS};
use lexis_core::source::{load_document_listing, load_movie_metadata, load_movie_summaries, load_stopwords, load_word_list};
use lexis_core::tokenizer::{Tokenizer, WordTokenizer};
use lexis_core::{CorpusBuilder, Document, DocumentIndex, Movie, MovieIndex, SentenceIndex, SentenceTokenizer, TextUnit};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;

pub use error::ApiError;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_DOCUMENT_RESULTS }

#[derive(Deserialize)]
pub struct SummarizeParams {
    pub q: String,
    #[serde(default = "default_words")]
    pub words: usize,
}
fn default_words() -> usize { DEFAULT_SUMMARY_WORDS }

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: String,
    #[serde(default = "default_movies")]
    pub k: usize,
}
fn default_movies() -> usize { DEFAULT_MOVIE_RESULTS }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: usize,
    pub score: f64,
    pub name: String,
    pub snippet: Option<String>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub question: String,
    pub words: usize,
    pub text: String,
    pub sentences: Vec<SentenceHit>,
}

#[derive(Serialize)]
pub struct SentenceHit {
    pub document: String,
    pub position: usize,
    pub score: f64,
    pub text: String,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub title: String,
    pub results: Vec<MovieHit>,
}

#[derive(Serialize)]
pub struct MovieHit {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
    pub score: f64,
}

#[derive(Deserialize)]
pub struct NewDocument {
    pub name: String,
    pub text: String,
}

/// Where the server reads its corpora from. Missing paths yield empty indexes.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub listing: Option<PathBuf>,
    pub stopwords: Option<PathBuf>,
    pub abbreviations: Option<PathBuf>,
    pub movie_summaries: Option<PathBuf>,
    pub movie_metadata: Option<PathBuf>,
}

#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<RwLock<DocumentIndex>>,
    pub sentences: Arc<RwLock<SentenceIndex>>,
    pub movies: Arc<MovieIndex>,
    pub admin_token: Option<String>,
}

impl AppState {
    /// Build and normalize every index described by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        let stopwords = config.stopwords.as_ref().map(load_stopwords).unwrap_or_default();
        let abbrevs = config.abbreviations.as_ref().map(load_word_list).unwrap_or_default();
        let docs = config
            .listing
            .as_ref()
            .map(|l| CorpusBuilder::<Document>::from_sources(load_document_listing(l)).build())
            .unwrap_or_default();

        let mut sentences = SentenceIndex::with_tokenizer(SentenceTokenizer::default().with_abbreviations(abbrevs))
            .with_stopwords(stopwords.clone());
        sentences.add_documents(&docs);
        sentences.normalize();

        let mut documents = DocumentIndex::from_items(docs).with_stopwords(stopwords);
        documents.normalize();

        let movies: Vec<Movie> = match (&config.movie_summaries, &config.movie_metadata) {
            (Some(s), Some(m)) => CorpusBuilder::<Movie>::from_movie_sources(load_movie_summaries(s), load_movie_metadata(m)).build(),
            _ => Vec::new(),
        };
        let mut movies = MovieIndex::from_movies(movies);
        movies.normalize();

        tracing::info!(documents = documents.len(), sentences = sentences.len(), movies = movies.len(), "indexes ready");
        Self {
            documents: Arc::new(RwLock::new(documents)),
            sentences: Arc::new(RwLock::new(sentences)),
            movies: Arc::new(movies),
            admin_token: None,
        }
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token;
        self
    }
}

pub fn build_app(config: &ServerConfig) -> Result<Router> {
    let state = AppState::from_config(config).with_admin_token(std::env::var("ADMIN_TOKEN").ok());

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Ok(build_router(state).layer(cors))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/summarize", get(summarize_handler))
        .route("/recommend", get(recommend_handler))
        .route("/index/documents", post(index_documents))
        .route("/index/commit", post(index_commit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let index = state.documents.read();
    let results = index.query(&params.q, params.k.clamp(1, MAX_K))?;
    let terms = query_terms(&params.q);

    let hits: Vec<SearchHit> = results
        .iter()
        .filter(|r| r.score() > 0.0)
        .map(|r| SearchHit {
            doc_id: r.index(),
            score: r.score(),
            name: r.item().name().to_string(),
            snippet: snippet(r.item().content(), &terms),
        })
        .collect();

    Ok(Json(SearchResponse { query: params.q, took_s: start.elapsed().as_secs_f64(), total_hits: hits.len(), results: hits }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<usize>) -> Result<Json<serde_json::Value>, ApiError> {
    let index = state.documents.read();
    let doc = index.get(doc_id).ok_or_else(|| ApiError::NotFound(format!("no document {doc_id}")))?;
    Ok(Json(serde_json::json!({
        "doc_id": doc_id,
        "name": doc.name(),
        "text": doc.content(),
    })))
}

pub async fn summarize_handler(State(state): State<AppState>, Query(params): Query<SummarizeParams>) -> Result<Json<SummaryResponse>, ApiError> {
    let index = state.sentences.read();
    let summary = index.summarize(&params.q, params.words)?;
    let sentences = summary
        .sentences
        .iter()
        .map(|r| SentenceHit {
            document: r.item().name().to_string(),
            position: r.item().pos(),
            score: r.score(),
            text: r.item().content().to_string(),
        })
        .collect();
    Ok(Json(SummaryResponse { question: params.q, words: summary.words, text: summary.text(), sentences }))
}

pub async fn recommend_handler(State(state): State<AppState>, Query(params): Query<RecommendParams>) -> Result<Json<RecommendResponse>, ApiError> {
    let results = state
        .movies
        .recommend(&params.title, params.k.clamp(1, MAX_K))?
        .iter()
        .map(|r| MovieHit {
            id: r.item().id().to_string(),
            title: r.item().title().to_string(),
            release_date: r.item().release_date().map(str::to_string),
            score: r.score(),
        })
        .collect();
    Ok(Json(RecommendResponse { title: params.title, results }))
}

/// Normalized, distinct query terms used for snippets.
fn query_terms(q: &str) -> Vec<String> {
    let mut terms: Vec<String> = WordTokenizer::new().tokenize(q).into_iter().filter(|t| !t.is_empty()).collect();
    terms.sort_unstable();
    terms.dedup();
    terms
}

fn term_pattern(terms: &[String]) -> Option<regex::Regex> {
    if terms.is_empty() {
        return None;
    }
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    regex::RegexBuilder::new(&format!("({alternation})")).case_insensitive(true).build().ok()
}

fn snippet(text: &str, terms: &[String]) -> Option<String> {
    if text.is_empty() { return None; }
    let pat = term_pattern(terms);
    let snippet: String = match pat.as_ref().and_then(|p| p.find(text)) {
        Some(m) => {
            let mut start = m.start().saturating_sub(100);
            while !text.is_char_boundary(start) { start -= 1; }
            let mut end = (m.start() + 200).min(text.len());
            while !text.is_char_boundary(end) { end += 1; }
            text[start..end].to_string()
        }
        None => text.chars().take(200).collect(),
    };
    Some(match &pat {
        Some(p) => p.replace_all(&snippet, "<em>$1</em>").to_string(),
        None => snippet,
    })
}

// --- Admin endpoints ---
async fn index_documents(State(state): State<AppState>, headers: HeaderMap, Json(docs): Json<Vec<NewDocument>>) -> Result<Json<serde_json::Value>, ApiError> {
    authorize(&state, &headers)?;
    let mut documents = state.documents.write();
    let mut sentences = state.sentences.write();
    for doc in &docs {
        let doc = Document::new(doc.name.clone(), doc.text.clone());
        sentences.add_document(&doc);
        documents.append(doc);
    }
    tracing::info!(appended = docs.len(), "documents appended, awaiting commit");
    Ok(Json(serde_json::json!({ "appended": docs.len(), "normalized": documents.is_normalized() })))
}

async fn index_commit(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, ApiError> {
    authorize(&state, &headers)?;
    let mut documents = state.documents.write();
    let mut sentences = state.sentences.write();
    documents.normalize();
    sentences.normalize();
    Ok(Json(serde_json::json!({ "documents": documents.len(), "sentences": sentences.len(), "normalized": true })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(ApiError::Unauthorized("ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_highlights_terms() {
        let terms = query_terms("Rust!");
        let s = snippet("Learning rust is fun. RUST everywhere.", &terms).unwrap();
        assert_eq!(s, "Learning <em>rust</em> is fun. <em>RUST</em> everywhere.");
    }

    #[test]
    fn snippet_without_terms_is_a_prefix() {
        let text = "x".repeat(500);
        assert_eq!(snippet(&text, &[]).unwrap().len(), 200);
        assert!(snippet("", &[]).is_none());
    }
}
