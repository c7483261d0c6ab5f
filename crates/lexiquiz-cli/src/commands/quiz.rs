//! The `lexiquiz quiz` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::Rng;

use lexiquiz_core::{
    partition, MistakeLedger, QuizMode, QuizSession, QuizState, SessionError,
};

use super::{print_feedback, print_summary, select_group, Console, Context};

pub fn execute(ctx: &Context, group: usize, mode: QuizMode) -> Result<()> {
    let store = ctx.open_store()?;
    let mut ledger = ctx.open_ledger();

    let groups = partition(store.corpus().words(), ctx.config.group_size());
    let selected = select_group(&groups, group)?;
    let mut session = QuizSession::start(selected, store.corpus(), mode, ctx.rng())?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    console.say(format!("{} ({mode})", selected.label()))?;
    run(&mut session, &mut ledger, &mut console)
}

/// Drive a quiz to the end, or until input runs out.
pub fn run<R: Rng, I: BufRead, O: Write>(
    session: &mut QuizSession<R>,
    ledger: &mut MistakeLedger,
    console: &mut Console<I, O>,
) -> Result<()> {
    loop {
        let prompt = match session.state() {
            QuizState::AwaitingAnswer(prompt) => prompt,
            QuizState::Finished(progress) => return print_summary(console, "Quiz", &progress),
        };
        console.say(format!(
            "\n[{}/{}] {}",
            prompt.position, prompt.total, prompt.term
        ))?;

        let outcome = match &prompt.choices {
            None => {
                let Some(answer) = console.ask("> ")? else {
                    return console.say("Session abandoned.");
                };
                session.submit_written(&answer, ledger)?
            }
            Some(choices) => {
                for (i, option) in choices.options().iter().enumerate() {
                    console.say(format!("  {}. {option}", i + 1))?;
                }
                loop {
                    let Some(answer) = console.ask("> ")? else {
                        return console.say("Session abandoned.");
                    };
                    match session.submit_choice(parse_choice(&answer), ledger) {
                        Ok(outcome) => break outcome,
                        Err(SessionError::InvalidSelection) => {
                            console.say("Please choose an answer.")?
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        };
        print_feedback(console, &outcome, &session.progress())?;
    }
}

/// Options are numbered from 1 on screen.
fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()?.checked_sub(1)
}
