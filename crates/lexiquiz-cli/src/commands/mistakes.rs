//! The `lexiquiz mistakes` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexiquiz_core::{MistakeLedger, MASTERY_STREAK};

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let ledger = ctx.open_ledger();
    if ledger.is_empty() {
        println!("No mistakes recorded.");
        return Ok(());
    }
    println!("{}", mistake_table(&ledger));
    println!("{} word(s) to review", ledger.len());
    Ok(())
}

fn mistake_table(ledger: &MistakeLedger) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Word", "Correct answers", "Streak"]);
    for entry in ledger.entries().values() {
        table.add_row(vec![
            Cell::new(&entry.term),
            Cell::new(entry.correct_answers.join(", ")),
            Cell::new(format!("{}/{MASTERY_STREAK}", entry.consecutive_correct)),
        ]);
    }
    table
}
