//! The mistake ledger: words answered wrong and not yet mastered.
//!
//! A miss creates an entry (or resets its streak). Each correct answer while
//! the entry exists extends the streak; at [`MASTERY_STREAK`] the entry is
//! removed. Every mutation is written through to the backing document before
//! the call returns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::{read_json, write_json};
use crate::error::StoreError;
use crate::traits::DocumentStore;

/// Consecutive correct answers needed to clear a mistake.
pub const MASTERY_STREAK: u32 = 2;

/// An outstanding mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeEntry {
    pub term: String,
    /// Translations as they were when the word was first missed.
    pub correct_answers: Vec<String>,
    /// Correct answers since the last miss.
    pub consecutive_correct: u32,
}

/// What a correct answer did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerUpdate {
    /// The word had no outstanding mistake.
    Untracked,
    /// A miss was recorded and the streak reset to 0.
    MissRecorded,
    /// The streak grew to this value.
    Streak(u32),
    /// The streak reached [`MASTERY_STREAK`] and the entry was removed.
    Mastered,
}

/// On-disk entry. Older documents store only the answer list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredMistake {
    Full {
        correct_answers: Vec<String>,
        #[serde(default)]
        correct_count: u32,
    },
    Legacy(Vec<String>),
}

/// Persistent record of words to re-drill.
pub struct MistakeLedger {
    document: Box<dyn DocumentStore>,
    entries: IndexMap<String, MistakeEntry>,
}

impl std::fmt::Debug for MistakeLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistakeLedger")
            .field("document", &self.document.location())
            .field("entries", &self.entries)
            .finish()
    }
}

impl MistakeLedger {
    /// Load the ledger. A missing document is an empty ledger; a corrupt one
    /// is logged and replaced by an empty ledger on the next write.
    pub fn open(document: Box<dyn DocumentStore>) -> Self {
        let entries = match read_json::<IndexMap<String, StoredMistake>>(document.as_ref()) {
            Ok(Some(stored)) => stored
                .into_iter()
                .map(|(term, stored)| {
                    let (correct_answers, consecutive_correct) = match stored {
                        StoredMistake::Full {
                            correct_answers,
                            correct_count,
                        } => (correct_answers, correct_count),
                        StoredMistake::Legacy(answers) => (answers, 0),
                    };
                    let entry = MistakeEntry {
                        term: term.clone(),
                        correct_answers,
                        consecutive_correct,
                    };
                    (term, entry)
                })
                .collect(),
            Ok(None) => IndexMap::new(),
            Err(e) => {
                tracing::warn!("starting with an empty mistake ledger: {e}");
                IndexMap::new()
            }
        };
        tracing::debug!(
            "loaded {} mistake(s) from {}",
            entries.len(),
            document.location()
        );
        Self { document, entries }
    }

    /// Record a wrong answer. Creates the entry, or resets an existing
    /// entry's streak to 0 whatever it was.
    pub fn record_mistake(
        &mut self,
        term: &str,
        correct_answers: &[String],
    ) -> Result<(), StoreError> {
        let mut staged = self.entries.clone();
        match staged.get_mut(term) {
            Some(entry) => entry.consecutive_correct = 0,
            None => {
                staged.insert(
                    term.to_string(),
                    MistakeEntry {
                        term: term.to_string(),
                        correct_answers: correct_answers.to_vec(),
                        consecutive_correct: 0,
                    },
                );
            }
        }
        self.commit(staged)
    }

    /// Record a correct answer for a word under review. No-op for words
    /// without an entry.
    pub fn record_review_correct(&mut self, term: &str) -> Result<LedgerUpdate, StoreError> {
        let Some(streak) = self.entries.get(term).map(|e| e.consecutive_correct + 1) else {
            return Ok(LedgerUpdate::Untracked);
        };
        let mut staged = self.entries.clone();
        let update = if streak >= MASTERY_STREAK {
            staged.shift_remove(term);
            LedgerUpdate::Mastered
        } else {
            if let Some(entry) = staged.get_mut(term) {
                entry.consecutive_correct = streak;
            }
            LedgerUpdate::Streak(streak)
        };
        self.commit(staged)?;
        if update == LedgerUpdate::Mastered {
            tracing::info!("'{term}' mastered, removed from the mistake ledger");
        }
        Ok(update)
    }

    /// Read-only view of the outstanding mistakes, oldest first.
    pub fn entries(&self) -> &IndexMap<String, MistakeEntry> {
        &self.entries
    }

    pub fn get(&self, term: &str) -> Option<&MistakeEntry> {
        self.entries.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `staged` and adopt it. On failure the ledger is unchanged, so
    /// the same answer can be recorded again.
    fn commit(&mut self, staged: IndexMap<String, MistakeEntry>) -> Result<(), StoreError> {
        let stored: IndexMap<&str, StoredMistake> = staged
            .iter()
            .map(|(term, entry)| {
                (
                    term.as_str(),
                    StoredMistake::Full {
                        correct_answers: entry.correct_answers.clone(),
                        correct_count: entry.consecutive_correct,
                    },
                )
            })
            .collect();
        write_json(self.document.as_ref(), &stored)?;
        self.entries = staged;
        Ok(())
    }
}
