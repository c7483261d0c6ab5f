//! Core data model types for lexiquiz.
//!
//! Words and translations are opaque strings; the only text processing the
//! engine does is answer normalization (trim + lowercase).

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An example sentence with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence in the language being learned.
    #[serde(alias = "english")]
    pub source: String,
    /// Its translation.
    #[serde(alias = "turkish")]
    pub target: String,
}

impl Sentence {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The word being learned. Unique within a corpus.
    pub term: String,
    /// Accepted translations, in display order. Never empty for stored words.
    pub translations: Vec<String>,
    /// Example sentences, possibly none.
    pub sentences: Vec<Sentence>,
}

impl Word {
    pub fn new<S: Into<String>>(term: impl Into<String>, translations: Vec<S>) -> Self {
        Self {
            term: term.into(),
            translations: translations.into_iter().map(Into::into).collect(),
            sentences: Vec::new(),
        }
    }

    pub fn with_sentences(mut self, sentences: Vec<Sentence>) -> Self {
        self.sentences = sentences;
        self
    }

    /// Whether `answer` matches one of the translations after normalization.
    pub fn accepts(&self, answer: &str) -> bool {
        matches_any(answer, &self.translations)
    }
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Exact, case-insensitive set membership. No fuzzy matching.
pub fn matches_any(answer: &str, accepted: &[String]) -> bool {
    let answer = normalize_answer(answer);
    accepted.iter().any(|a| a.to_lowercase() == answer)
}

/// All known words, keyed by term, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    words: IndexMap<String, Word>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<&Word> {
        self.words.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in corpus order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    /// Add `word`, or append its translations and sentences to an existing
    /// entry with the same term. Returns `true` if the term was new.
    pub(crate) fn merge(&mut self, word: Word) -> bool {
        match self.words.get_mut(&word.term) {
            Some(existing) => {
                existing.translations.extend(word.translations);
                existing.sentences.extend(word.sentences);
                false
            }
            None => {
                self.words.insert(word.term.clone(), word);
                true
            }
        }
    }
}

impl FromIterator<Word> for Corpus {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for word in iter {
            corpus.merge(word);
        }
        corpus
    }
}

/// How answers are given in a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    /// Type the translation.
    Written,
    /// Pick the translation out of four options.
    MultipleChoice,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Written => write!(f, "written"),
            QuizMode::MultipleChoice => write!(f, "multiple-choice"),
        }
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "written" | "write" => Ok(QuizMode::Written),
            "multiple-choice" | "choice" | "mc" => Ok(QuizMode::MultipleChoice),
            other => Err(format!("unknown quiz mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_mode_display_and_parse() {
        assert_eq!(QuizMode::Written.to_string(), "written");
        assert_eq!(QuizMode::MultipleChoice.to_string(), "multiple-choice");
        assert_eq!("written".parse::<QuizMode>().unwrap(), QuizMode::Written);
        assert_eq!("MC".parse::<QuizMode>().unwrap(), QuizMode::MultipleChoice);
        assert_eq!(
            "choice".parse::<QuizMode>().unwrap(),
            QuizMode::MultipleChoice
        );
        assert!("oral".parse::<QuizMode>().is_err());
    }

    #[test]
    fn accepts_any_case_and_surrounding_whitespace() {
        let word = Word::new("conclusion", vec!["sonuç", "Çıkarım"]);
        assert!(word.accepts("sonuç"));
        assert!(word.accepts("  SONUÇ \n"));
        assert!(word.accepts("çıkarım"));
        assert!(!word.accepts("sonu"));
        assert!(!word.accepts("sonuç çıkarım"));
        assert!(!word.accepts(""));
    }

    #[test]
    fn corpus_merges_duplicate_terms() {
        let corpus: Corpus = vec![
            Word::new("data", vec!["veri"]),
            Word::new("theory", vec!["teori"]),
            Word::new("data", vec!["veri", "bilgi"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.get("data").unwrap().translations,
            vec!["veri", "veri", "bilgi"]
        );
        let terms: Vec<&str> = corpus.words().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["data", "theory"]);
    }

    #[test]
    fn sentence_accepts_language_named_keys() {
        let s: Sentence =
            serde_json::from_str(r#"{"english": "The data is clear.", "turkish": "Veri açık."}"#)
                .unwrap();
        assert_eq!(s, Sentence::new("The data is clear.", "Veri açık."));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"source\""));
    }
}
