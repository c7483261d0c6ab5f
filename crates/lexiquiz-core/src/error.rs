//! Error types for storage and sessions.
//!
//! Storage errors split into recoverable data problems (a missing or corrupt
//! document, which callers replace with a seed corpus or an empty ledger) and
//! fatal write failures. Session errors are guards against actions the front
//! end should not have offered.

use thiserror::Error;

use crate::model::QuizMode;

/// Errors raised while reading or writing persisted documents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document is missing, unreadable, or malformed.
    #[error("data unavailable in {location}: {reason}")]
    DataUnavailable { location: String, reason: String },

    /// Writing the document failed. Never retried.
    #[error("failed to write {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory data could not be encoded as JSON.
    #[error("failed to encode {location}: {source}")]
    Encode {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// A word was added without any translation.
    #[error("word '{0}' has no translations")]
    NoTranslations(String),
}

impl StoreError {
    /// Returns `true` if the caller can recover by substituting default data.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::DataUnavailable { .. })
    }
}

/// Errors raised by quiz, review, and study sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A quiz was started on a group with no words.
    #[error("cannot start a quiz on an empty group")]
    EmptyGroup,

    /// A review was started while the mistake ledger is empty.
    #[error("the mistake ledger is empty, nothing to review")]
    NothingToReview,

    /// A multiple-choice answer was submitted without a valid selection.
    #[error("no answer was selected")]
    InvalidSelection,

    /// The rest of the corpus cannot supply three distinct distractors.
    #[error("need 3 distractors for '{term}' but only {available} are available")]
    InsufficientDistractors { term: String, available: usize },

    /// A word in the session has nothing to answer with.
    #[error("word '{0}' has no translations")]
    NoTranslations(String),

    /// The submit operation does not match the session's mode.
    #[error("{operation} is not available in {mode} mode")]
    WrongMode {
        mode: QuizMode,
        operation: &'static str,
    },

    /// An answer was submitted after the last word.
    #[error("the session has already finished")]
    Finished,

    /// Persisting a ledger update failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Returns `true` if the error means the caller offered an invalid action,
    /// as opposed to a storage failure.
    pub fn is_misuse(&self) -> bool {
        !matches!(self, SessionError::Store(_))
    }
}
