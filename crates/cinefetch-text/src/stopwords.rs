//! Stopword filtering backed by the `stop-words` crate.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

/// Case-insensitive stopword set.
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    /// Lower-cased stopwords.
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Builds the stopword set for a language code or name (`"en"`, `"english"`, ...).
    ///
    /// Unknown languages fall back to English.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            other => {
                tracing::warn!(
                    language = other,
                    "Unknown stopword language, falling back to English"
                );
                LANGUAGE::English
            }
        };

        let stopwords = get(lang).iter().map(|s| s.to_lowercase()).collect();
        Self { stopwords }
    }

    /// English stopwords.
    #[must_use]
    pub fn english() -> Self {
        Self::for_language("en")
    }

    /// Builds a filter from a custom list.
    #[must_use]
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Adds words to the set.
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Returns `true` if `word` is a stopword, ignoring case.
    #[must_use]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stopwords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
