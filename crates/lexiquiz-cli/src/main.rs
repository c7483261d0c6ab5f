//! lexiquiz CLI: vocabulary quizzes with mistake review in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexiquiz_core::QuizMode;

mod commands;

#[derive(Parser)]
#[command(
    name = "lexiquiz",
    version,
    about = "Vocabulary quizzes with mistake review"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides the config file and LEXIQUIZ_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for shuffling, for repeatable sessions
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quiz yourself on a group of words
    Quiz {
        /// Group number, starting at 1
        #[arg(long, default_value = "1")]
        group: usize,

        /// Answer mode: written or choice
        #[arg(long, default_value = "written")]
        mode: QuizMode,
    },

    /// Re-drill words you got wrong
    Review,

    /// Browse a group of words with example sentences
    Study {
        /// Group number, starting at 1
        #[arg(long, default_value = "1")]
        group: usize,

        /// Study the quiz word list instead of the extended list
        #[arg(long)]
        primary: bool,
    },

    /// Add a word, or more translations for a known word
    Add {
        /// The word being learned
        term: String,

        /// Translations (comma-separated values are split)
        #[arg(required = true)]
        translations: Vec<String>,

        /// Example sentence using the word
        #[arg(long, requires = "sentence_translation")]
        sentence: Option<String>,

        /// Translation of the example sentence
        #[arg(long, requires = "sentence")]
        sentence_translation: Option<String>,
    },

    /// List the word groups
    Groups {
        /// List groups of the extended study list
        #[arg(long)]
        extended: bool,
    },

    /// List outstanding mistakes
    Mistakes,

    /// Create a starter config and word list
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexiquiz=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = commands::Context::load(cli.config.as_deref(), cli.data_dir, cli.seed).and_then(
        |ctx| match cli.command {
            Commands::Quiz { group, mode } => commands::quiz::execute(&ctx, group, mode),
            Commands::Review => commands::review::execute(&ctx),
            Commands::Study { group, primary } => commands::study::execute(&ctx, group, primary),
            Commands::Add {
                term,
                translations,
                sentence,
                sentence_translation,
            } => commands::add::execute(&ctx, term, translations, sentence, sentence_translation),
            Commands::Groups { extended } => commands::groups::execute(&ctx, extended),
            Commands::Mistakes => commands::mistakes::execute(&ctx),
            Commands::Init => commands::init::execute(&ctx),
        },
    );

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
