use crate::config::DEFAULT_TERMINATORS;
use std::collections::HashSet;

/// Splits raw text into an ordered sequence of tokens.
///
/// Implementations keep no per-call state, so the same tokenizer can be reused
/// for any number of inputs.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Lowercase a word and drop every ASCII punctuation character from it.
pub fn normalize_term(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whitespace tokenizer producing normalized terms.
///
/// Words that are pure punctuation normalize to an empty string; those are kept in
/// the output and ignored by [`crate::TermCounts::insert`].
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    strip: Option<String>,
}

impl WordTokenizer {
    pub fn new() -> Self { Self::default() }

    /// Strip only the given characters instead of all punctuation.
    pub fn with_strip_chars(chars: impl Into<String>) -> Self {
        Self { strip: Some(chars.into()) }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| match &self.strip {
                Some(strip) => word
                    .chars()
                    .filter(|c| !strip.contains(*c))
                    .flat_map(char::to_lowercase)
                    .collect(),
                None => normalize_term(word),
            })
            .collect()
    }
}

/// Splits text into sentences on terminator characters, honouring abbreviations.
#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    terminators: Vec<char>,
    abbreviations: HashSet<String>,
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_TERMINATORS)
    }
}

impl SentenceTokenizer {
    pub fn new(terminators: &str) -> Self {
        Self { terminators: terminators.chars().collect(), abbreviations: HashSet::new() }
    }

    /// Abbreviations are normalized with [`normalize_term`] before they are stored.
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            abbreviations
                .into_iter()
                .map(|a| normalize_term(a.as_ref()))
                .filter(|a| !a.is_empty()),
        );
        self
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&normalize_term(word))
    }

    pub fn abbreviations(&self) -> &HashSet<String> { &self.abbreviations }

    fn terminator_in(&self, word: &str) -> Option<char> {
        word.chars().find(|c| self.terminators.contains(c))
    }
}

impl Tokenizer for SentenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let ends_sentence = match self.terminator_in(word) {
                Some('.') => !self.is_abbreviation(word),
                Some(_) => true,
                None => false,
            };
            current.push_str(word);
            if ends_sentence {
                sentences.push(std::mem::take(&mut current));
            } else {
                current.push(' ');
            }
        }

        // trailing text with no terminator still forms a sentence
        let rest = current.trim_end();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }
}
