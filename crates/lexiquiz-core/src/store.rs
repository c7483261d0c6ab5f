//! The word store: loading, seeding, and persisting the corpus.
//!
//! The primary words document accepts three shapes on read:
//!
//! - legacy: `{"term": ["translation", ...]}`
//! - extended: `{"term": {"translations": [...], "sentences": [...]}}`
//! - list: `{"words": [{"english": "term", "turkish": [...], "sentences": [...]}]}`
//!
//! On write, words with sentences use the extended shape and all others the
//! legacy shape. The extended study document uses the list shape and is only
//! ever read.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::{read_json, write_json};
use crate::error::StoreError;
use crate::model::{Corpus, Sentence, Word};
use crate::traits::DocumentStore;

/// Result of [`WordStore::add_word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new term was added.
    Inserted,
    /// The term existed; the new translations were appended.
    MergedTranslation,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredWord {
    Legacy(Vec<String>),
    Extended {
        #[serde(alias = "turkish")]
        translations: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        sentences: Vec<Sentence>,
    },
}

#[derive(Debug, Deserialize)]
struct ListedWord {
    #[serde(alias = "english")]
    term: String,
    #[serde(alias = "turkish")]
    translations: Vec<String>,
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct WordList {
    words: Vec<ListedWord>,
}

/// Owns the corpus and its backing document.
pub struct WordStore {
    document: Box<dyn DocumentStore>,
    corpus: Corpus,
}

impl std::fmt::Debug for WordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordStore")
            .field("document", &self.document.location())
            .field("words", &self.corpus.len())
            .finish()
    }
}

impl WordStore {
    /// A store with an empty corpus. Call [`WordStore::load`] or
    /// [`WordStore::load_or_seed`] before use.
    pub fn new(document: Box<dyn DocumentStore>) -> Self {
        Self {
            document,
            corpus: Corpus::new(),
        }
    }

    /// Read the corpus from the document.
    ///
    /// Fails with `DataUnavailable` if the document is missing, malformed, or
    /// has no usable words. The in-memory corpus is left untouched on error.
    pub fn load(&mut self) -> Result<&Corpus, StoreError> {
        let location = self.document.location();
        let Some(content) = self.document.read()? else {
            return Err(StoreError::DataUnavailable {
                location,
                reason: "document does not exist".into(),
            });
        };
        let corpus = parse_corpus(&content, &location)?;
        if corpus.is_empty() {
            return Err(StoreError::DataUnavailable {
                location,
                reason: "document has no words".into(),
            });
        }
        tracing::debug!("loaded {} word(s) from {location}", corpus.len());
        self.corpus = corpus;
        Ok(&self.corpus)
    }

    /// Like [`WordStore::load`], but falls back to the built-in seed corpus
    /// and persists it when the document is unavailable.
    pub fn load_or_seed(&mut self) -> Result<&Corpus, StoreError> {
        if let Err(e) = self.load().map(|_| ()) {
            if !e.is_recoverable() {
                return Err(e);
            }
            tracing::info!("{e}; installing the seed corpus");
            self.corpus = seed_corpus();
            self.save()?;
        }
        Ok(&self.corpus)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Overwrite the document with the current corpus.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write_corpus(&self.corpus)
    }

    fn write_corpus(&self, corpus: &Corpus) -> Result<(), StoreError> {
        let stored: IndexMap<&str, StoredWord> = corpus
            .words()
            .map(|word| {
                let stored = if word.sentences.is_empty() {
                    StoredWord::Legacy(word.translations.clone())
                } else {
                    StoredWord::Extended {
                        translations: word.translations.clone(),
                        sentences: word.sentences.clone(),
                    }
                };
                (word.term.as_str(), stored)
            })
            .collect();
        write_json(self.document.as_ref(), &stored)?;
        tracing::debug!(
            "saved {} word(s) to {}",
            corpus.len(),
            self.document.location()
        );
        Ok(())
    }

    /// Add a word, or append translations and sentences to an existing one.
    /// Duplicated translations are kept. The corpus is saved immediately.
    ///
    /// Translations are trimmed and blank ones dropped; at least one must
    /// remain.
    pub fn add_word(
        &mut self,
        term: &str,
        translations: &[String],
        sentences: Vec<Sentence>,
    ) -> Result<AddOutcome, StoreError> {
        let term = term.trim();
        let translations: Vec<String> = translations
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if term.is_empty() || translations.is_empty() {
            return Err(StoreError::NoTranslations(term.to_string()));
        }

        let mut staged = self.corpus.clone();
        let inserted = staged.merge(Word::new(term, translations).with_sentences(sentences));
        self.write_corpus(&staged)?;
        self.corpus = staged;

        let outcome = if inserted {
            AddOutcome::Inserted
        } else {
            AddOutcome::MergedTranslation
        };
        tracing::debug!("add_word '{term}': {outcome:?}");
        Ok(outcome)
    }
}

/// Parse a primary words document in any accepted shape.
pub fn parse_corpus(content: &str, location: &str) -> Result<Corpus, StoreError> {
    let unavailable = |e: serde_json::Error| StoreError::DataUnavailable {
        location: location.to_string(),
        reason: e.to_string(),
    };

    let words: Vec<Word> = match serde_json::from_str::<IndexMap<String, StoredWord>>(content) {
        Ok(map) => map
            .into_iter()
            .map(|(term, stored)| match stored {
                StoredWord::Legacy(translations) => Word::new(term, translations),
                StoredWord::Extended {
                    translations,
                    sentences,
                } => Word::new(term, translations).with_sentences(sentences),
            })
            .collect(),
        Err(map_err) => match serde_json::from_str::<WordList>(content) {
            Ok(list) => list.words.into_iter().map(ListedWord::into_word).collect(),
            Err(_) => return Err(unavailable(map_err)),
        },
    };

    Ok(usable(words, location).collect())
}

/// Read the extended study document. A missing document is an empty list.
pub fn load_extended(document: &dyn DocumentStore) -> Result<Vec<Word>, StoreError> {
    let location = document.location();
    let words = match read_json::<WordList>(document)? {
        Some(list) => list.words.into_iter().map(ListedWord::into_word).collect(),
        None => {
            tracing::warn!("extended word list {location} not found");
            Vec::new()
        }
    };
    Ok(usable(words, &location).collect())
}

/// The corpus installed when no words document is available.
pub fn seed_corpus() -> Corpus {
    const SEED: [(&str, &[&str]); 10] = [
        ("experiment", &["deney"]),
        ("hypothesis", &["hipotez"]),
        ("analysis", &["analiz"]),
        ("data", &["veri"]),
        ("research", &["araştırma"]),
        ("theory", &["teori"]),
        ("method", &["yöntem"]),
        ("result", &["sonuç"]),
        ("observation", &["gözlem"]),
        ("conclusion", &["sonuç", "çıkarım"]),
    ];
    SEED.into_iter()
        .map(|(term, translations)| Word::new(term, translations.to_vec()))
        .collect()
}

impl ListedWord {
    fn into_word(self) -> Word {
        Word::new(self.term, self.translations).with_sentences(self.sentences)
    }
}

fn usable<'a>(words: Vec<Word>, location: &'a str) -> impl Iterator<Item = Word> + 'a {
    words.into_iter().filter(move |word| {
        let keep = !word.translations.is_empty();
        if !keep {
            tracing::warn!("skipping '{}' in {location}: no translations", word.term);
        }
        keep
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FileDocument, MemoryDocument};

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn store_with(doc: &MemoryDocument) -> WordStore {
        WordStore::new(Box::new(doc.clone()))
    }

    #[test]
    fn load_legacy_shape() {
        let doc = MemoryDocument::with_contents(r#"{"cat": ["kedi"], "dog": ["köpek", "it"]}"#);
        let mut store = store_with(&doc);
        let corpus = store.load().unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("dog").unwrap().translations, vec!["köpek", "it"]);
    }

    #[test]
    fn load_mixed_legacy_and_extended_shapes() {
        let doc = MemoryDocument::with_contents(
            r#"{
                "cat": ["kedi"],
                "data": {
                    "turkish": ["veri"],
                    "sentences": [{"english": "Collect the data.", "turkish": "Veriyi topla."}]
                },
                "method": {"translations": ["yöntem"]}
            }"#,
        );
        let mut store = store_with(&doc);
        let corpus = store.load().unwrap();
        let data = corpus.get("data").unwrap();
        assert_eq!(data.translations, vec!["veri"]);
        assert_eq!(
            data.sentences,
            vec![Sentence::new("Collect the data.", "Veriyi topla.")]
        );
        assert!(corpus.get("method").unwrap().sentences.is_empty());
        let terms: Vec<&str> = corpus.words().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["cat", "data", "method"]);
    }

    #[test]
    fn load_list_shape() {
        let doc = MemoryDocument::with_contents(
            r#"{"words": [{"english": "theory", "turkish": ["teori"], "sentences": []}]}"#,
        );
        let mut store = store_with(&doc);
        assert_eq!(
            store.load().unwrap().get("theory").unwrap().translations,
            vec!["teori"]
        );
    }

    #[test]
    fn missing_malformed_or_empty_is_data_unavailable() {
        for doc in [
            MemoryDocument::new(),
            MemoryDocument::with_contents("not json at all"),
            MemoryDocument::with_contents("{}"),
            MemoryDocument::with_contents(r#"{"cat": []}"#),
        ] {
            let mut store = store_with(&doc);
            let err = store.load().unwrap_err();
            assert!(err.is_recoverable(), "{err}");
        }
    }

    #[test]
    fn seed_fallback_persists_immediately() {
        let doc = MemoryDocument::new();
        let mut store = store_with(&doc);
        let corpus = store.load_or_seed().unwrap();
        assert_eq!(corpus.len(), 10);
        assert_eq!(
            corpus.get("conclusion").unwrap().translations,
            vec!["sonuç", "çıkarım"]
        );
        assert_eq!(doc.write_count(), 1);

        let mut reopened = store_with(&doc);
        assert_eq!(reopened.load().unwrap(), &seed_corpus());
    }

    #[test]
    fn seed_fallback_surfaces_write_failure() {
        let doc = MemoryDocument::new();
        doc.fail_writes(true);
        let mut store = store_with(&doc);
        assert!(matches!(
            store.load_or_seed().unwrap_err(),
            StoreError::Write { .. }
        ));
    }

    #[test]
    fn round_trip_preserves_translations_and_sentences() {
        let doc = MemoryDocument::with_contents(
            r#"{
                "cat": ["kedi"],
                "data": {"translations": ["veri", "bilgi"], "sentences": [{"source": "a", "target": "b"}]}
            }"#,
        );
        let mut store = store_with(&doc);
        let original = store.load().unwrap().clone();
        store.save().unwrap();

        let mut reopened = store_with(&doc);
        assert_eq!(reopened.load().unwrap(), &original);

        let value: serde_json::Value = serde_json::from_str(&doc.contents().unwrap()).unwrap();
        assert!(value["cat"].is_array());
        assert!(value["data"].is_object());
    }

    #[test]
    fn add_word_inserts_then_merges_with_duplicates() {
        let doc = MemoryDocument::with_contents(r#"{"cat": ["kedi"]}"#);
        let mut store = store_with(&doc);
        store.load().unwrap();

        let outcome = store
            .add_word("dog", &strings(&["köpek"]), Vec::new())
            .unwrap();
        assert_eq!(outcome, AddOutcome::Inserted);
        assert_eq!(doc.write_count(), 1);

        let outcome = store
            .add_word(
                "cat",
                &strings(&[" kedi", "pisi "]),
                vec![Sentence::new("The cat sleeps.", "Kedi uyuyor.")],
            )
            .unwrap();
        assert_eq!(outcome, AddOutcome::MergedTranslation);
        assert_eq!(doc.write_count(), 2);

        let cat = store.corpus().get("cat").unwrap();
        assert_eq!(cat.translations, vec!["kedi", "kedi", "pisi"]);
        assert_eq!(cat.sentences.len(), 1);

        let mut reopened = store_with(&doc);
        let corpus = reopened.load().unwrap();
        assert_eq!(corpus.get("cat").unwrap().sentences.len(), 1);
        assert_eq!(corpus.get("dog").unwrap().translations, vec!["köpek"]);
    }

    #[test]
    fn add_word_requires_a_translation() {
        let doc = MemoryDocument::new();
        let mut store = store_with(&doc);
        let err = store
            .add_word("cat", &strings(&["  ", ""]), Vec::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::NoTranslations(_)));
        assert_eq!(doc.write_count(), 0);
    }

    #[test]
    fn add_word_surfaces_write_failure() {
        let doc = MemoryDocument::new();
        doc.fail_writes(true);
        let mut store = store_with(&doc);
        let err = store
            .add_word("cat", &strings(&["kedi"]), Vec::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(store.corpus().get("cat").is_none());
    }

    #[test]
    fn add_word_retry_after_failed_write_does_not_duplicate() {
        let doc = MemoryDocument::new();
        let mut store = store_with(&doc);
        store.add_word("cat", &strings(&["kedi"]), Vec::new()).unwrap();

        doc.fail_writes(true);
        assert!(store.add_word("cat", &strings(&["pisi"]), Vec::new()).is_err());
        assert_eq!(store.corpus().get("cat").unwrap().translations, vec!["kedi"]);

        doc.fail_writes(false);
        store.add_word("cat", &strings(&["pisi"]), Vec::new()).unwrap();
        assert_eq!(
            store.corpus().get("cat").unwrap().translations,
            vec!["kedi", "pisi"]
        );
    }

    #[test]
    fn extended_document_reads_list_shape() {
        let doc = MemoryDocument::with_contents(
            r#"{"words": [
                {"english": "analysis", "turkish": ["analiz"], "sentences": [
                    {"english": "The analysis took a week.", "turkish": "Analiz bir hafta sürdü."}
                ]},
                {"english": "broken", "turkish": [], "sentences": []}
            ]}"#,
        );
        let words = load_extended(&doc).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].term, "analysis");
        assert_eq!(words[0].sentences[0].target, "Analiz bir hafta sürdü.");
    }

    #[test]
    fn extended_document_missing_is_empty_and_malformed_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileDocument::new(dir.path().join("words_extended.json"));
        assert!(load_extended(&missing).unwrap().is_empty());

        let bad = MemoryDocument::with_contents(r#"{"cat": ["kedi"]}"#);
        assert!(load_extended(&bad).unwrap_err().is_recoverable());
    }

    #[test]
    fn file_backed_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("words.json");
        let mut store = WordStore::new(Box::new(FileDocument::new(&path)));
        store.load_or_seed().unwrap();
        store
            .add_word("sample", &strings(&["örnek"]), Vec::new())
            .unwrap();

        let mut reopened = WordStore::new(Box::new(FileDocument::new(&path)));
        let corpus = reopened.load().unwrap();
        assert_eq!(corpus.len(), 11);
        assert!(corpus.contains("sample"));
    }
}
