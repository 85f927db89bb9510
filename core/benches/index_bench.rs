use criterion::{criterion_group, criterion_main, Criterion};
use lexis_core::tokenizer::{SentenceTokenizer, Tokenizer, WordTokenizer};
use lexis_core::{Document, DocumentIndex};

const WORDS: &[&str] = &[
    "index", "query", "term", "weight", "cosine", "vector", "sentence", "movie", "summary", "search",
    "rank", "score", "token", "corpus", "document", "frequency", "inverse", "log", "space", "model",
];

fn synthetic_text(seed: usize, len: usize) -> String {
    (0..len).map(|i| WORDS[(seed * 7 + i * 13) % WORDS.len()]).collect::<Vec<_>>().join(" ") + "."
}

fn bench_tokenize(c: &mut Criterion) {
    let text = synthetic_text(1, 2_000);
    c.bench_function("tokenize_words", |b| b.iter(|| WordTokenizer::new().tokenize(&text)));
    let sentences = (0..200).map(|i| synthetic_text(i, 10)).collect::<Vec<_>>().join(" ");
    c.bench_function("tokenize_sentences", |b| b.iter(|| SentenceTokenizer::default().tokenize(&sentences)));
}

fn bench_query(c: &mut Criterion) {
    let mut index = DocumentIndex::from_items((0..500).map(|i| Document::new(format!("doc{i}"), synthetic_text(i, 200))));
    index.normalize();
    c.bench_function("query_500_docs", |b| b.iter(|| index.query("cosine vector space model", 10)));
}

criterion_group!(benches, bench_tokenize, bench_query);
criterion_main!(benches);
