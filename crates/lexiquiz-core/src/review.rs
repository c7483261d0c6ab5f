//! Re-drilling missed words.
//!
//! A review walks a shuffled snapshot of the ledger in written mode and
//! checks answers against the translations recorded at the first miss. The
//! ledger itself keeps changing underneath: correct answers extend streaks and
//! may master a word, misses reset them. The snapshot does not.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SessionError;
use crate::ledger::{LedgerUpdate, MistakeEntry, MistakeLedger};
use crate::model::matches_any;
use crate::quiz::{AnswerOutcome, Prompt, QuizState};
use crate::statistics::{Progress, Tally};

#[derive(Debug)]
pub struct ReviewSession {
    pool: Vec<MistakeEntry>,
    cursor: usize,
    tally: Tally,
}

impl ReviewSession {
    /// Snapshot and shuffle the ledger's entries.
    pub fn start<R: Rng>(ledger: &MistakeLedger, mut rng: R) -> Result<Self, SessionError> {
        if ledger.is_empty() {
            return Err(SessionError::NothingToReview);
        }
        let mut pool: Vec<MistakeEntry> = ledger.entries().values().cloned().collect();
        pool.shuffle(&mut rng);
        tracing::debug!("review started with {} word(s)", pool.len());
        Ok(Self {
            pool,
            cursor: 0,
            tally: Tally::default(),
        })
    }

    pub fn submit(
        &mut self,
        text: &str,
        ledger: &mut MistakeLedger,
    ) -> Result<AnswerOutcome, SessionError> {
        let entry = self.pool.get(self.cursor).ok_or(SessionError::Finished)?;
        let correct = matches_any(text, &entry.correct_answers);

        let update = if correct {
            ledger.record_review_correct(&entry.term)?
        } else {
            ledger.record_mistake(&entry.term, &entry.correct_answers)?;
            LedgerUpdate::MissRecorded
        };

        let outcome = AnswerOutcome {
            term: entry.term.clone(),
            correct,
            submitted: text.trim().to_string(),
            expected: entry.correct_answers.clone(),
            ledger: update,
        };
        self.tally.record(correct);
        self.cursor += 1;
        Ok(outcome)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pool.len()
    }

    /// The entry awaiting an answer, as snapshotted at start.
    pub fn current(&self) -> Option<&MistakeEntry> {
        self.pool.get(self.cursor)
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.tally, self.pool.len())
    }

    pub fn state(&self) -> QuizState {
        match self.pool.get(self.cursor) {
            Some(entry) => QuizState::AwaitingAnswer(Prompt {
                term: entry.term.clone(),
                position: self.cursor + 1,
                total: self.pool.len(),
                choices: None,
            }),
            None => QuizState::Finished(self.progress()),
        }
    }
}
