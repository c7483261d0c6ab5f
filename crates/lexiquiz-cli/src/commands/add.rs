//! The `lexiquiz add` command.

use anyhow::Result;

use lexiquiz_core::{AddOutcome, Sentence};

use super::Context;

pub fn execute(
    ctx: &Context,
    term: String,
    translations: Vec<String>,
    sentence: Option<String>,
    sentence_translation: Option<String>,
) -> Result<()> {
    let mut store = ctx.open_store()?;

    let translations = split_translations(&translations);
    let sentences = match (sentence, sentence_translation) {
        (Some(source), Some(target)) => vec![Sentence::new(source, target)],
        _ => Vec::new(),
    };

    let term = term.trim();
    match store.add_word(term, &translations, sentences)? {
        AddOutcome::Inserted => println!("Added '{term}'"),
        AddOutcome::MergedTranslation => {
            println!("Added translations to existing word '{term}'")
        }
    }
    if let Some(word) = store.corpus().get(term) {
        println!("  {}", word.translations.join(", "));
    }
    Ok(())
}

/// Each argument may hold several comma-separated translations.
fn split_translations(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
