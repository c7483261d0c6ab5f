//! The `lexiquiz groups` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexiquiz_core::store::load_extended;
use lexiquiz_core::{partition, Group, Word};

use super::Context;

pub fn execute(ctx: &Context, extended: bool) -> Result<()> {
    let (words, source) = if extended {
        let document = ctx.config.extended_words_document();
        (load_extended(&document)?, ctx.config.extended_words_path())
    } else {
        let store = ctx.open_store()?;
        let words: Vec<Word> = store.corpus().words().cloned().collect();
        (words, ctx.config.words_path())
    };

    let groups = partition(&words, ctx.config.group_size());
    if groups.is_empty() {
        println!("No words in {}.", source.display());
        return Ok(());
    }

    println!("{} word(s) in {}", words.len(), source.display());
    println!("{}", group_table(&groups));
    Ok(())
}

fn group_table(groups: &[Group<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Group", "Words", "Size", "First", "Last"]);

    for group in groups {
        let (first, last) = group.word_range();
        let term = |word: Option<&&Word>| word.map(|w| w.term.clone()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(group.index + 1),
            Cell::new(format!("{first}-{last}")),
            Cell::new(group.len()),
            Cell::new(term(group.words.first())),
            Cell::new(term(group.words.last())),
        ]);
    }
    table
}
