//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB endpoint settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Text normalization defaults.
    #[serde(default)]
    pub text: TextConfig,
}

/// TMDB endpoint configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Overrides the API base URL (default: `https://api.themoviedb.org/3/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language sent with every search (e.g. `en-US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Text normalization configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextConfig {
    /// Stopword list language.
    #[serde(default = "default_text_language")]
    pub language: String,
    /// Words added to the stopword list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    /// Whether stopwords are removed.
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
    /// Whether words are lemmatized.
    #[serde(default = "default_true")]
    pub lemmatize: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            language: default_text_language(),
            extra_stopwords: Vec::new(),
            remove_stopwords: true,
            lemmatize: true,
        }
    }
}

fn default_text_language() -> String {
    String::from("en")
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
