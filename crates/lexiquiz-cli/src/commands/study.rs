//! The `lexiquiz study` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::Rng;

use lexiquiz_core::store::load_extended;
use lexiquiz_core::{partition, Group, StudyBrowser, StudyView, Word};

use super::{select_group, Console, Context};

pub fn execute(ctx: &Context, group: usize, primary: bool) -> Result<()> {
    let store;
    let extended: Vec<Word>;
    let words: Vec<&Word> = if primary {
        store = ctx.open_store()?;
        store.corpus().words().collect()
    } else {
        let document = ctx.config.extended_words_document();
        extended = load_extended(&document)?;
        if extended.is_empty() {
            println!(
                "No study words in {}. Use --primary to study the quiz words.",
                ctx.config.extended_words_path().display()
            );
            return Ok(());
        }
        extended.iter().collect()
    };

    let groups = partition(words, ctx.config.group_size());
    let selected = select_group(&groups, group)?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    let mut browser = StudyBrowser::new(ctx.rng());
    run(&mut browser, selected, &mut console)
}

/// Browse until the user quits or input runs out.
pub fn run<R: Rng, I: BufRead, O: Write>(
    browser: &mut StudyBrowser<R>,
    group: &Group<'_>,
    console: &mut Console<I, O>,
) -> Result<()> {
    browser.load(group);
    console.say(group.label())?;
    console.say("Commands: Enter or n (next), p (previous), q (quit)")?;

    loop {
        let sentence = browser.sentence().cloned();
        let position = browser.position();
        match (browser.current(), position) {
            (StudyView::Word(word), Some((index, total))) => {
                console.say(format!("\n[{index}/{total}] {}", word.term))?;
                console.say(format!("  {}", word.translations.join(", ")))?;
                if let Some(sentence) = sentence {
                    console.say(format!("  \"{}\"", sentence.source))?;
                    console.say(format!("  \"{}\"", sentence.target))?;
                }
            }
            _ => console.say("\nGroup completed.")?,
        }

        let Some(command) = console.ask("> ")? else {
            return Ok(());
        };
        match command.trim() {
            "" | "n" => {
                browser.next();
            }
            "p" => {
                browser.previous();
            }
            "q" => return Ok(()),
            other => console.say(format!("Unknown command '{other}'. Use n, p, or q."))?,
        }
    }
}
