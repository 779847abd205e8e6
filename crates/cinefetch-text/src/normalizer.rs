//! Caller-owned text normalization pipeline.

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopwordFilter;
use crate::tokenizer::tokenize;

/// Stopword removal and lemmatization over single values or whole columns.
///
/// Owns its linguistic resources; construct one and pass it where needed.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Stopword set.
    stopwords: StopwordFilter,
    /// Noun lemmatizer.
    lemmatizer: Lemmatizer,
    /// Whether `normalize` drops stopwords.
    remove_stopwords: bool,
    /// Whether `normalize` lemmatizes.
    lemmatize: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl TextNormalizer {
    /// Normalizer from explicit resources, with both steps enabled.
    #[must_use]
    pub const fn new(stopwords: StopwordFilter, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
            remove_stopwords: true,
            lemmatize: true,
        }
    }

    /// English stopwords and lemmatizer.
    #[must_use]
    pub fn english() -> Self {
        Self::new(StopwordFilter::english(), Lemmatizer::english())
    }

    /// Enables or disables stopword removal in [`Self::normalize`].
    #[must_use]
    pub const fn with_stopword_removal(mut self, enabled: bool) -> Self {
        self.remove_stopwords = enabled;
        self
    }

    /// Enables or disables lemmatization in [`Self::normalize`].
    #[must_use]
    pub const fn with_lemmatization(mut self, enabled: bool) -> Self {
        self.lemmatize = enabled;
        self
    }

    /// Tokenizes `text` and drops stopwords; tokens are re-joined with single spaces.
    #[must_use]
    pub fn remove_stopwords(&self, text: &str) -> String {
        tokenize(text)
            .into_iter()
            .filter(|token| !self.stopwords.is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lemmatizes each whitespace-separated word.
    #[must_use]
    pub fn lemmatize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.lemmatizer.lemmatize(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Applies the enabled steps: stopword removal, then lemmatization.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let text = if self.remove_stopwords {
            self.remove_stopwords(text)
        } else {
            String::from(text)
        };
        if self.lemmatize {
            self.lemmatize(&text)
        } else {
            text
        }
    }

    /// Normalizes every present value; absent values stay absent.
    #[must_use]
    pub fn normalize_column(&self, values: &[Option<String>]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|value| value.as_deref().map(|text| self.normalize(text)))
            .collect()
    }
}
