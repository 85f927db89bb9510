use lexis_core::tokenizer::{SentenceTokenizer, Tokenizer, WordTokenizer};

#[test]
fn it_normalizes_words() {
    let words = WordTokenizer::new().tokenize("Running, RUNNERS run! The café's menu.");
    assert_eq!(words, vec!["running", "runners", "run", "the", "cafés", "menu"]);
}

#[test]
fn it_keeps_stopwords() {
    let words = WordTokenizer::new().tokenize("The quick brown fox and the lazy dog");
    assert!(words.contains(&"the".to_string()));
    assert!(words.contains(&"and".to_string()));
}

#[test]
fn it_suppresses_breaks_after_abbreviations() {
    let t = SentenceTokenizer::new(".?!").with_abbreviations(["mr"]);
    let sentences = t.tokenize("Mr. Smith arrived. He left.");
    assert_eq!(sentences, vec!["Mr. Smith arrived.", "He left."]);
}

#[test]
fn it_breaks_on_unknown_abbreviations() {
    let sentences = SentenceTokenizer::default().tokenize("Mr. Smith arrived.");
    assert_eq!(sentences, vec!["Mr.", "Smith arrived."]);
}

#[test]
fn it_matches_abbreviations_case_insensitively() {
    let t = SentenceTokenizer::default().with_abbreviations(["Dr.", "e.g."]);
    let sentences = t.tokenize("DR. Who likes tea, e.g. green tea. Done!");
    assert_eq!(sentences, vec!["DR. Who likes tea, e.g. green tea.", "Done!"]);
}
