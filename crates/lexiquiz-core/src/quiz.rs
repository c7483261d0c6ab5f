//! The quiz session state machine.
//!
//! A session shuffles a private copy of one group and walks through it:
//! `AwaitingAnswer` for each word, then `Finished`. Every submission is
//! scored, fed into the mistake ledger, and advances the cursor, so a group of
//! N words finishes after exactly N submissions.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SessionError;
use crate::grouper::Group;
use crate::ledger::{LedgerUpdate, MistakeLedger};
use crate::model::{Corpus, QuizMode, Word};
use crate::statistics::{Progress, Tally};

/// Options shown per multiple-choice prompt.
pub const CHOICE_COUNT: usize = 4;

const DISTRACTOR_COUNT: usize = CHOICE_COUNT - 1;

/// The options of one multiple-choice prompt: one correct translation and
/// three distractors, in random order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    options: Vec<String>,
}

impl ChoiceSet {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// What the front end should show while waiting for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub term: String,
    /// 1-based position of this word in the session.
    pub position: usize,
    pub total: usize,
    /// Present in multiple-choice mode.
    pub choices: Option<ChoiceSet>,
}

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizState {
    AwaitingAnswer(Prompt),
    /// Terminal state with the final tallies.
    Finished(Progress),
}

/// How one submission was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub term: String,
    pub correct: bool,
    /// The answer as submitted, trimmed.
    pub submitted: String,
    /// Every accepted translation, for feedback.
    pub expected: Vec<String>,
    /// What the answer did to the mistake ledger.
    pub ledger: LedgerUpdate,
}

/// One quiz run over a group.
pub struct QuizSession<R> {
    mode: QuizMode,
    pool: Vec<Word>,
    cursor: usize,
    tally: Tally,
    /// Distractor source, kept only in multiple-choice mode.
    corpus: Option<Corpus>,
    choices: Option<ChoiceSet>,
    rng: R,
}

impl<R> std::fmt::Debug for QuizSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .field("total", &self.pool.len())
            .field("tally", &self.tally)
            .finish()
    }
}

impl<R: Rng> QuizSession<R> {
    /// Start a quiz over `group`, drawing distractors from `corpus`.
    ///
    /// In multiple-choice mode every word is checked for enough distractors
    /// up front, so a started session never fails for that reason later.
    pub fn start(
        group: &Group<'_>,
        corpus: &Corpus,
        mode: QuizMode,
        mut rng: R,
    ) -> Result<Self, SessionError> {
        if group.is_empty() {
            return Err(SessionError::EmptyGroup);
        }

        let mut pool: Vec<Word> = group.words.iter().map(|w| (*w).clone()).collect();
        if let Some(word) = pool.iter().find(|w| w.translations.is_empty()) {
            return Err(SessionError::NoTranslations(word.term.clone()));
        }
        pool.shuffle(&mut rng);

        let corpus = match mode {
            QuizMode::Written => None,
            QuizMode::MultipleChoice => {
                for word in &pool {
                    let available = distractor_pool(word, corpus).len();
                    if available < DISTRACTOR_COUNT {
                        return Err(SessionError::InsufficientDistractors {
                            term: word.term.clone(),
                            available,
                        });
                    }
                }
                Some(corpus.clone())
            }
        };

        let mut session = Self {
            mode,
            pool,
            cursor: 0,
            tally: Tally::default(),
            corpus,
            choices: None,
            rng,
        };
        session.prepare_prompt()?;
        tracing::debug!(
            "quiz started: group {} ({} words, {mode})",
            group.index + 1,
            session.pool.len()
        );
        Ok(session)
    }

    /// Submit a typed answer. Matching trims and lowercases the input and
    /// requires an exact match with one of the translations.
    pub fn submit_written(
        &mut self,
        text: &str,
        ledger: &mut MistakeLedger,
    ) -> Result<AnswerOutcome, SessionError> {
        let word = self.current_for("submit_written", QuizMode::Written)?;
        let correct = word.accepts(text);
        self.score(correct, text.trim().to_string(), ledger)
    }

    /// Submit the index of a multiple-choice option. `None` or an index
    /// outside the options is `InvalidSelection` and changes nothing.
    pub fn submit_choice(
        &mut self,
        selection: Option<usize>,
        ledger: &mut MistakeLedger,
    ) -> Result<AnswerOutcome, SessionError> {
        let word = self.current_for("submit_choice", QuizMode::MultipleChoice)?;
        let selected = self
            .choices
            .as_ref()
            .zip(selection)
            .and_then(|(choices, index)| choices.get(index))
            .ok_or(SessionError::InvalidSelection)?
            .to_string();
        let correct = word.translations.iter().any(|t| *t == selected);
        self.score(correct, selected, ledger)
    }

    fn current_for(
        &self,
        operation: &'static str,
        mode: QuizMode,
    ) -> Result<&Word, SessionError> {
        let word = self.pool.get(self.cursor).ok_or(SessionError::Finished)?;
        if self.mode != mode {
            return Err(SessionError::WrongMode {
                mode: self.mode,
                operation,
            });
        }
        Ok(word)
    }

    fn score(
        &mut self,
        correct: bool,
        submitted: String,
        ledger: &mut MistakeLedger,
    ) -> Result<AnswerOutcome, SessionError> {
        let word = &self.pool[self.cursor];
        let update = if correct {
            if ledger.contains(&word.term) {
                ledger.record_review_correct(&word.term)?
            } else {
                LedgerUpdate::Untracked
            }
        } else {
            ledger.record_mistake(&word.term, &word.translations)?;
            LedgerUpdate::MissRecorded
        };

        let outcome = AnswerOutcome {
            term: word.term.clone(),
            correct,
            submitted,
            expected: word.translations.clone(),
            ledger: update,
        };

        self.tally.record(correct);
        self.cursor += 1;
        self.prepare_prompt()?;
        Ok(outcome)
    }

    fn prepare_prompt(&mut self) -> Result<(), SessionError> {
        self.choices = match (self.pool.get(self.cursor), &self.corpus) {
            (Some(word), Some(corpus)) => Some(generate_choices(word, corpus, &mut self.rng)?),
            _ => None,
        };
        if self.cursor == self.pool.len() {
            tracing::debug!(
                "quiz finished: {} correct, {} incorrect",
                self.tally.correct,
                self.tally.incorrect
            );
        }
        Ok(())
    }
}

impl<R> QuizSession<R> {
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.pool.len()
    }

    /// The word awaiting an answer, if any.
    pub fn current_word(&self) -> Option<&Word> {
        self.pool.get(self.cursor)
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.tally, self.pool.len())
    }

    pub fn state(&self) -> QuizState {
        match self.pool.get(self.cursor) {
            Some(word) => QuizState::AwaitingAnswer(Prompt {
                term: word.term.clone(),
                position: self.cursor + 1,
                total: self.pool.len(),
                choices: self.choices.clone(),
            }),
            None => QuizState::Finished(self.progress()),
        }
    }
}

/// Build the four options for `word`: one of its translations chosen
/// uniformly, plus three distinct distractors sampled from the other words'
/// translations. Strings equal (ignoring case) to any of `word`'s own
/// translations are never used as distractors.
pub fn generate_choices<R: Rng + ?Sized>(
    word: &Word,
    corpus: &Corpus,
    rng: &mut R,
) -> Result<ChoiceSet, SessionError> {
    let correct = word
        .translations
        .choose(rng)
        .ok_or_else(|| SessionError::NoTranslations(word.term.clone()))?;

    let pool = distractor_pool(word, corpus);
    if pool.len() < DISTRACTOR_COUNT {
        return Err(SessionError::InsufficientDistractors {
            term: word.term.clone(),
            available: pool.len(),
        });
    }

    let mut options = Vec::with_capacity(CHOICE_COUNT);
    options.push(correct.clone());
    options.extend(
        pool.choose_multiple(rng, DISTRACTOR_COUNT)
            .map(|s| s.to_string()),
    );
    options.shuffle(rng);
    Ok(ChoiceSet { options })
}

/// Distinct translations of every other word, minus the target's own.
fn distractor_pool<'a>(word: &Word, corpus: &'a Corpus) -> Vec<&'a str> {
    let own: HashSet<String> = word.translations.iter().map(|t| t.to_lowercase()).collect();
    let mut seen = HashSet::new();
    corpus
        .words()
        .filter(|other| other.term != word.term)
        .flat_map(|other| other.translations.iter())
        .filter(|t| {
            let key = t.to_lowercase();
            !own.contains(&key) && seen.insert(key)
        })
        .map(String::as_str)
        .collect()
}
