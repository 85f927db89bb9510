//! Plain-text rendering of indexes and query results.

use lexis_core::{Document, Movie, QueryResult, Sentence, Summary, TermDocIndex, TextUnit};
use std::fmt::Write;

const PRECISION: usize = 3;

/// Term × document table of raw counts, or of weights when `weights` is set.
///
/// Stopwords are left out. Columns are sized to the widest header or value.
pub fn term_table(index: &TermDocIndex<Document>, weights: bool) -> String {
    if index.is_empty() {
        return "(empty)\n".to_string();
    }
    let terms = index.reportable_terms();
    let term_w = terms.iter().map(|t| t.chars().count()).max().unwrap_or(0).max("term".len());
    let headers: Vec<&str> = index.items().iter().map(Document::short_name).collect();
    let cell_w = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0).max(PRECISION + 3);

    let mut out = String::new();
    let _ = write!(out, "{:<term_w$}", "term");
    for h in &headers {
        let _ = write!(out, " | {h:>cell_w$}");
    }
    out.push('\n');
    out.push_str(&"-".repeat(term_w + headers.len() * (cell_w + 3)));
    out.push('\n');

    for term in terms {
        let _ = write!(out, "{term:<term_w$}");
        if let Some(v) = index.term_vectors(term) {
            for i in 0..index.len() {
                if weights {
                    let _ = write!(out, " | {:>cell_w$.PRECISION$}", v.weights[i]);
                } else {
                    let _ = write!(out, " | {:>cell_w$}", v.freqs[i]);
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Numbered `'name' - cosine similarity of 0.123` lines.
pub fn ranked_documents(query: &str, results: &[QueryResult<'_, Document>]) -> String {
    let mut out = format!("QUERY: {query}\n");
    for (n, r) in results.iter().enumerate() {
        let _ = writeln!(out, " #{}: '{}' - cosine similarity of {:.PRECISION$}", n + 1, r.item().name(), r.score());
    }
    out
}

pub fn sentence_line(result: &QueryResult<'_, Sentence>) -> String {
    let s = result.item();
    format!("({:.PRECISION$}) [{}] [{}] {}", result.score(), s.name(), s.pos(), s.content())
}

/// One [`sentence_line`] per summary sentence, in summary order.
pub fn sentence_lines(summary: &Summary<'_>) -> String {
    summary.sentences.iter().map(|r| sentence_line(r) + "\n").collect()
}

pub fn movie_entry(movie: &Movie) -> String {
    format!(
        "[{}] \"{}\" (released {})\n\n{}",
        movie.id(),
        movie.title(),
        movie.release_date().unwrap_or("unknown"),
        movie.summary()
    )
}

pub fn summary_block(question: &str, summary: &Summary<'_>) -> String {
    let rule = "-".repeat(80);
    format!(
        "{rule}\nQUESTION: {question}\n{rule}\n{}\n\n***  END ({} WORDS)  ***\n{rule}\n",
        summary.text(),
        summary.words
    )
}

pub fn recommendations(title: &str, results: &[QueryResult<'_, Movie>]) -> String {
    let mut out = format!("MOVIES LIKE: {title}\n");
    for (n, r) in results.iter().enumerate() {
        let _ = writeln!(out, "\n #{} ({:.PRECISION$}) {}", n + 1, r.score(), movie_entry(r.item()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_core::{DocumentIndex, SentenceIndex, Stopwords};

    #[test]
    fn table_hides_stopwords() {
        let mut idx = DocumentIndex::from_items([Document::new("dir/a.txt", "the cat"), Document::new("dir/b.txt", "the dog")])
            .with_stopwords(Stopwords::new(["the"]));
        idx.normalize();
        let table = term_table(&idx, false);
        assert!(table.starts_with("term"));
        assert!(table.contains("a.txt"));
        assert!(table.lines().any(|l| l.starts_with("cat")));
        assert!(!table.lines().any(|l| l.starts_with("the")));
    }

    #[test]
    fn ranked_lines_are_numbered() {
        let mut idx = DocumentIndex::from_items([Document::new("a", "cat"), Document::new("b", "dog")]);
        idx.normalize();
        let results = idx.query("cat", 10).unwrap();
        let out = ranked_documents("cat", &results);
        assert!(out.contains(" #1: 'a' - cosine similarity of 1.000"));
        assert!(out.contains(" #2: 'b' - cosine similarity of 0.000"));
    }

    #[test]
    fn sentence_lines_show_position() {
        let mut idx = SentenceIndex::new();
        idx.add_document(&Document::new("doc", "Cats purr. Dogs bark."));
        idx.normalize();
        let results = idx.query("dogs", 1).unwrap();
        assert_eq!(sentence_line(&results[0]), "(1.000) [doc] [1] Dogs bark.");
    }

    #[test]
    fn summary_sentences_are_listed_one_per_line() {
        let mut idx = SentenceIndex::new();
        idx.add_document(&Document::new("doc", "Cats purr. Dogs bark."));
        idx.normalize();
        let summary = idx.summarize("dogs", 100).unwrap();
        assert_eq!(sentence_lines(&summary), "(1.000) [doc] [1] Dogs bark.\n");
    }

    #[test]
    fn movie_entry_defaults_release_date() {
        let m = Movie::new("7", "Up", "A house flies.", None);
        assert_eq!(movie_entry(&m), "[7] \"Up\" (released unknown)\n\nA house flies.");
    }
}
