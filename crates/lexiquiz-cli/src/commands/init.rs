//! The `lexiquiz init` command.

use std::path::Path;

use anyhow::Result;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    if Path::new("lexiquiz.toml").exists() {
        println!("lexiquiz.toml already exists, skipping.");
    } else {
        std::fs::write("lexiquiz.toml", SAMPLE_CONFIG)?;
        println!("Created lexiquiz.toml");
    }

    let words_path = ctx.config.words_path();
    if words_path.exists() {
        println!("{} already exists, skipping.", words_path.display());
    } else {
        let store = ctx.open_store()?;
        println!(
            "Created {} with {} starter words",
            words_path.display(),
            store.corpus().len()
        );
    }

    println!("\nNext steps:");
    println!("  1. Add words: lexiquiz add <word> <translation>");
    println!("  2. Run: lexiquiz quiz");
    println!("  3. Re-drill misses: lexiquiz review");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# lexiquiz configuration

# Directory holding the word lists and the mistake ledger.
# ${VAR} references are expanded; LEXIQUIZ_DATA_DIR overrides this value.
data_dir = "./data"

words_file = "words.json"
extended_words_file = "words_extended.json"
mistakes_file = "mistakes.json"

# Words per quiz and study group.
group_size = 50
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lexiquiz_core::config::LexiquizConfig;

    #[test]
    fn sample_config_parses_to_defaults() {
        let config: LexiquizConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, LexiquizConfig::default());
    }
}
