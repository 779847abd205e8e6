//! Word tokenizer.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Word runs (keeping in-word apostrophes) or runs of punctuation.
#[allow(clippy::expect_used)]
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:['’]\w+)*|[^\w\s]+").expect("failed to compile token regex")
});

/// Splits `text` into word and punctuation tokens after NFKC normalization.
///
/// Contractions such as `don't` stay a single token.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text.nfkc().collect();
    TOKEN_RE
        .find_iter(&normalized)
        .map(|m| String::from(m.as_str()))
        .collect()
}
