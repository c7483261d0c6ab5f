//! Configuration loading.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::FileDocument;
use crate::grouper::DEFAULT_GROUP_SIZE;

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "LEXIQUIZ_DATA_DIR";

/// Top-level lexiquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiquizConfig {
    /// Directory holding the word and mistake documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Primary word list, relative to `data_dir`.
    #[serde(default = "default_words_file")]
    pub words_file: String,
    /// Study word list with example sentences, relative to `data_dir`.
    #[serde(default = "default_extended_words_file")]
    pub extended_words_file: String,
    /// Mistake ledger, relative to `data_dir`.
    #[serde(default = "default_mistakes_file")]
    pub mistakes_file: String,
    /// Words per quiz and study group.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_words_file() -> String {
    "words.json".to_string()
}
fn default_extended_words_file() -> String {
    "words_extended.json".to_string()
}
fn default_mistakes_file() -> String {
    "mistakes.json".to_string()
}
fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE.get()
}

impl Default for LexiquizConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            words_file: default_words_file(),
            extended_words_file: default_extended_words_file(),
            mistakes_file: default_mistakes_file(),
            group_size: default_group_size(),
        }
    }
}

impl LexiquizConfig {
    pub fn words_path(&self) -> PathBuf {
        self.data_dir.join(&self.words_file)
    }

    pub fn extended_words_path(&self) -> PathBuf {
        self.data_dir.join(&self.extended_words_file)
    }

    pub fn mistakes_path(&self) -> PathBuf {
        self.data_dir.join(&self.mistakes_file)
    }

    pub fn words_document(&self) -> FileDocument {
        FileDocument::new(self.words_path())
    }

    pub fn extended_words_document(&self) -> FileDocument {
        FileDocument::new(self.extended_words_path())
    }

    pub fn mistakes_document(&self) -> FileDocument {
        FileDocument::new(self.mistakes_path())
    }

    /// The configured group size. Validated at load time.
    pub fn group_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.group_size).unwrap_or(DEFAULT_GROUP_SIZE)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables expand to nothing. Expanded values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lexiquiz.toml` in the current directory
/// 2. `~/.config/lexiquiz/config.toml`
///
/// `LEXIQUIZ_DATA_DIR` overrides `data_dir`.
pub fn load_config() -> Result<LexiquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LexiquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexiquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LexiquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexiquizConfig::default(),
    };

    if config.group_size == 0 {
        anyhow::bail!("group_size must be at least 1");
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        config.data_dir = PathBuf::from(dir);
    }
    let data_dir = resolve_env_vars(&config.data_dir.to_string_lossy());
    config.data_dir = PathBuf::from(data_dir);

    match &config_path {
        Some(path) => tracing::debug!("loaded config from {}", path.display()),
        None => tracing::debug!("no config file found, using defaults"),
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexiquiz"))
}
