//! The `lexiquiz review` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use lexiquiz_core::{MistakeLedger, QuizState, ReviewSession};

use super::{print_feedback, print_summary, Console, Context};

pub fn execute(ctx: &Context) -> Result<()> {
    let mut ledger = ctx.open_ledger();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());

    if ledger.is_empty() {
        return console.say("No mistakes to review.");
    }
    let mut session = ReviewSession::start(&ledger, ctx.rng())?;
    console.say(format!("Reviewing {} word(s)", ledger.len()))?;
    run(&mut session, &mut ledger, &mut console)
}

/// Drive a review to the end, or until input runs out.
pub fn run<I: BufRead, O: Write>(
    session: &mut ReviewSession,
    ledger: &mut MistakeLedger,
    console: &mut Console<I, O>,
) -> Result<()> {
    while let QuizState::AwaitingAnswer(prompt) = session.state() {
        console.say(format!(
            "\n[{}/{}] {}",
            prompt.position, prompt.total, prompt.term
        ))?;
        let Some(answer) = console.ask("> ")? else {
            return console.say("Session abandoned.");
        };
        let outcome = session.submit(&answer, ledger)?;
        print_feedback(console, &outcome, &session.progress())?;
    }
    print_summary(console, "Review", &session.progress())?;
    console.say(format!("{} word(s) left to master.", ledger.len()))
}
