//! lexiquiz-core: quiz engine, mistake ledger, and word storage.
//!
//! This crate defines the vocabulary data model, its JSON persistence, and the
//! session state machines (quiz, review, study) that a front end drives.

pub mod config;
pub mod document;
pub mod error;
pub mod grouper;
pub mod ledger;
pub mod model;
pub mod quiz;
pub mod review;
pub mod statistics;
pub mod store;
pub mod study;
pub mod traits;

pub use error::{SessionError, StoreError};
pub use grouper::{partition, Group, DEFAULT_GROUP_SIZE};
pub use ledger::{LedgerUpdate, MistakeEntry, MistakeLedger, MASTERY_STREAK};
pub use model::{Corpus, QuizMode, Sentence, Word};
pub use quiz::{generate_choices, AnswerOutcome, ChoiceSet, Prompt, QuizSession, QuizState};
pub use review::ReviewSession;
pub use statistics::{Progress, Tally};
pub use store::{AddOutcome, WordStore};
pub use study::{StudyBrowser, StudyView};
