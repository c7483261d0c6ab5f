//! Subcommand implementations and the pieces they share.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lexiquiz_core::config::{load_config_from, LexiquizConfig};
use lexiquiz_core::{AnswerOutcome, Group, LedgerUpdate, MistakeLedger, Progress, WordStore};

pub mod add;
pub mod groups;
pub mod init;
pub mod mistakes;
pub mod quiz;
pub mod review;
pub mod study;

/// Settings resolved from the config file and global flags.
pub struct Context {
    pub config: LexiquizConfig,
    seed: Option<u64>,
}

impl Context {
    /// Load the config, then apply `--data-dir`.
    pub fn load(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        tracing::debug!("data directory: {}", config.data_dir.display());
        Ok(Self { config, seed })
    }

    /// Seeded when `--seed` was given, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Open the primary word list, seeding it if it is missing or unusable.
    pub fn open_store(&self) -> Result<WordStore> {
        let mut store = WordStore::new(Box::new(self.config.words_document()));
        store
            .load_or_seed()
            .with_context(|| format!("failed to open {}", self.config.words_path().display()))?;
        Ok(store)
    }

    pub fn open_ledger(&self) -> MistakeLedger {
        MistakeLedger::open(Box::new(self.config.mistakes_document()))
    }
}

/// Pick a group by its 1-based number.
pub fn select_group<'g, 'a>(groups: &'g [Group<'a>], number: usize) -> Result<&'g Group<'a>> {
    if groups.is_empty() {
        anyhow::bail!("there are no words to group");
    }
    number
        .checked_sub(1)
        .and_then(|index| groups.get(index))
        .with_context(|| {
            format!(
                "group {number} does not exist (choose 1-{})",
                groups.len()
            )
        })
}

/// Line-oriented terminal I/O.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.say("")?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

pub fn print_feedback<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    outcome: &AnswerOutcome,
    progress: &Progress,
) -> Result<()> {
    if outcome.correct {
        console.say("Correct!")?;
    } else {
        console.say(format!(
            "Incorrect. Correct answer(s): {}",
            outcome.expected.join(", ")
        ))?;
    }
    match outcome.ledger {
        LedgerUpdate::Mastered => console.say(format!("'{}' mastered.", outcome.term))?,
        LedgerUpdate::Streak(n) => console.say(format!(
            "'{}': {n}/{} correct in a row.",
            outcome.term,
            lexiquiz_core::MASTERY_STREAK
        ))?,
        LedgerUpdate::Untracked | LedgerUpdate::MissRecorded => {}
    }
    console.say(format!(
        "Score: {} correct, {} incorrect",
        progress.correct, progress.incorrect
    ))
}

pub fn print_summary<I: BufRead, O: Write>(
    console: &mut Console<I, O>,
    title: &str,
    progress: &Progress,
) -> Result<()> {
    console.say(format!(
        "\n{title} finished: {}/{} correct ({:.0}%)",
        progress.correct, progress.total, progress.percent_correct
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexiquiz_core::{partition, Corpus, Word, DEFAULT_GROUP_SIZE};
    use std::io::Cursor;
    use std::num::NonZeroUsize;

    #[test]
    fn ask_strips_line_endings_and_reports_eof() {
        let mut out = Vec::new();
        let mut console = Console::new(Cursor::new("kedi\r\n second \n"), &mut out);
        assert_eq!(console.ask("> ").unwrap().as_deref(), Some("kedi"));
        assert_eq!(console.ask("> ").unwrap().as_deref(), Some(" second "));
        assert_eq!(console.ask("> ").unwrap(), None);
        drop(console);
        assert!(String::from_utf8(out).unwrap().starts_with("> > > "));
    }

    #[test]
    fn groups_are_selected_by_one_based_number() {
        let corpus: Corpus = (0..5)
            .map(|i| Word::new(format!("w{i}"), vec![format!("t{i}")]))
            .collect();
        let groups = partition(corpus.words(), NonZeroUsize::new(2).unwrap());
        assert_eq!(select_group(&groups, 3).unwrap().index, 2);

        let err = select_group(&groups, 0).unwrap_err();
        assert!(err.to_string().contains("choose 1-3"));
        assert!(select_group(&groups, 4).is_err());

        let empty = Corpus::new();
        let none = partition(empty.words(), DEFAULT_GROUP_SIZE);
        assert!(select_group(&none, 1).is_err());
    }
}
