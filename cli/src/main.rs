use anyhow::Result;
use clap::{Parser, Subcommand};
use lexis_core::config::{DEFAULT_DOCUMENT_RESULTS, DEFAULT_MOVIE_RESULTS, DEFAULT_SUMMARY_WORDS, DEFAULT_TERMINATORS};
use lexis_core::source::{load_document_listing, load_movie_metadata, load_movie_summaries, load_stopwords, load_word_list, read_source};
use lexis_core::{CorpusBuilder, Document, DocumentIndex, Movie, MovieIndex, SentenceIndex, SentenceTokenizer};
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

mod report;

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "TF-IDF search, summarization and movie recommendation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents against a free-text query
    Search {
        /// File listing document paths, whitespace separated
        #[arg(long)]
        listing: PathBuf,
        /// Number of results to show
        #[arg(long, default_value_t = DEFAULT_DOCUMENT_RESULTS)]
        top: usize,
        /// Query text; when omitted, queries are read from stdin until an empty line
        query: Option<String>,
    },
    /// Print the term-document table of a listing
    Terms {
        #[arg(long)]
        listing: PathBuf,
        /// Stopwords hidden from the table
        #[arg(long)]
        stopwords: Option<PathBuf>,
        /// Show TF-IDF weights instead of raw counts
        #[arg(long, default_value_t = false)]
        weights: bool,
    },
    /// Build an extractive summary answering a question
    Summarize {
        #[arg(long)]
        listing: PathBuf,
        /// Abbreviations that do not end a sentence
        #[arg(long)]
        abbreviations: Option<PathBuf>,
        /// Sentence terminator characters
        #[arg(long, default_value = DEFAULT_TERMINATORS)]
        terminators: String,
        /// Read the question from a file instead of the command line
        #[arg(long, conflicts_with = "question")]
        question_file: Option<PathBuf>,
        /// Word budget for the summary
        #[arg(long, default_value_t = DEFAULT_SUMMARY_WORDS)]
        words: usize,
        /// Also list each chosen sentence with its score and position
        #[arg(long, default_value_t = false)]
        sentences: bool,
        question: Option<String>,
    },
    /// Recommend movies with plots similar to a title
    Recommend {
        /// Plot summaries, one `id<TAB>summary` per line
        #[arg(long)]
        summaries: PathBuf,
        /// Movie metadata TSV
        #[arg(long)]
        metadata: PathBuf,
        #[arg(long, default_value_t = DEFAULT_MOVIE_RESULTS)]
        top: usize,
        title: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { listing, top, query } => search(&listing, top, query),
        Commands::Terms { listing, stopwords, weights } => {
            let index = document_index(&listing, stopwords.as_deref());
            print!("{}", report::term_table(&index, weights));
            Ok(())
        }
        Commands::Summarize { listing, abbreviations, terminators, question_file, words, sentences, question } => {
            let question = match (question, question_file) {
                (Some(q), _) => q,
                (None, Some(path)) => read_question(&path)?,
                (None, None) => anyhow::bail!("a question or --question-file is required"),
            };
            summarize(&listing, abbreviations.as_deref(), &terminators, &question, words, sentences)
        }
        Commands::Recommend { summaries, metadata, top, title } => recommend(&summaries, &metadata, &title, top),
    }
}

fn document_index(listing: &Path, stopwords: Option<&Path>) -> DocumentIndex {
    let stopwords = stopwords.map(load_stopwords).unwrap_or_default();
    let mut index = CorpusBuilder::<Document>::from_sources(load_document_listing(listing))
        .into_index()
        .with_stopwords(stopwords);
    index.normalize();
    index
}

fn search(listing: &Path, top: usize, query: Option<String>) -> Result<()> {
    let index = document_index(listing, None);
    if let Some(q) = query {
        let results = index.query(&q, top)?;
        print!("{}", report::ranked_documents(&q, &results));
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "Type in a query: ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let q = line?;
        if q.trim().is_empty() {
            break;
        }
        match index.query(&q, top) {
            Ok(results) => print!("{}", report::ranked_documents(&q, &results)),
            Err(err) => eprintln!("error: {err}"),
        }
        write!(stdout, "Type in another query: ")?;
        stdout.flush()?;
    }
    Ok(())
}

/// Question text is the file's lines up to the first blank one, joined.
fn read_question(path: &Path) -> Result<String> {
    let text = read_source(path)?;
    Ok(text.lines().take_while(|l| !l.trim().is_empty()).collect::<Vec<_>>().join(" "))
}

fn summarize(
    listing: &Path,
    abbreviations: Option<&Path>,
    terminators: &str,
    question: &str,
    words: usize,
    list_sentences: bool,
) -> Result<()> {
    let abbrevs = abbreviations.map(load_word_list).unwrap_or_default();
    let tokenizer = SentenceTokenizer::new(terminators).with_abbreviations(abbrevs);
    let docs = CorpusBuilder::<Document>::from_sources(load_document_listing(listing)).build();

    let mut index = SentenceIndex::with_tokenizer(tokenizer);
    index.add_documents(&docs);
    index.normalize();
    tracing::info!(documents = index.document_count(), sentences = index.len(), "sentence index ready");

    let summary = index.summarize(question, words)?;
    print!("{}", report::summary_block(question, &summary));
    if list_sentences {
        print!("{}", report::sentence_lines(&summary));
    }
    Ok(())
}

fn recommend(summaries: &Path, metadata: &Path, title: &str, top: usize) -> Result<()> {
    let movies: Vec<Movie> =
        CorpusBuilder::<Movie>::from_movie_sources(load_movie_summaries(summaries), load_movie_metadata(metadata)).build();
    let mut index = MovieIndex::from_movies(movies);
    index.normalize();
    tracing::info!(movies = index.len(), terms = index.index().term_count(), "movie index ready");

    let results = index.recommend(title, top)?;
    print!("{}", report::recommendations(title, &results));
    Ok(())
}
