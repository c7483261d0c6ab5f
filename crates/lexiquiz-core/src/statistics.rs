//! Score tallies and progress snapshots.

use serde::{Deserialize, Serialize};

/// Running count of correct and incorrect answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub incorrect: u32,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// `correct / answered * 100`, or 0 when nothing has been answered.
    pub fn percent_correct(&self) -> f64 {
        let answered = self.answered();
        if answered == 0 {
            0.0
        } else {
            self.correct as f64 / answered as f64 * 100.0
        }
    }
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Number of answers submitted so far.
    pub answered: usize,
    /// Number of words in the session.
    pub total: usize,
    pub correct: u32,
    pub incorrect: u32,
    /// Share of correct answers in percent, 0 when nothing was answered.
    pub percent_correct: f64,
}

impl Progress {
    pub fn new(tally: Tally, total: usize) -> Self {
        Self {
            answered: tally.answered() as usize,
            total,
            correct: tally.correct,
            incorrect: tally.incorrect,
            percent_correct: tally.percent_correct(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}
