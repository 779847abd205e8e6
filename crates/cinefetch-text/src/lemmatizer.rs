//! Rule-based English noun lemmatizer.
//!
//! Applies WordNet-style detachment rules plus a table of irregular forms.
//! Without a dictionary the rules are guarded conservatively: only
//! lower-case alphabetic words longer than three characters are touched,
//! singular endings such as `-ss`, `-us`, `-is` and `-ics` are left alone, and
//! a table of `s`-final non-plurals (`always`, `lens`, ...) maps to itself.

use std::collections::HashMap;

/// Irregular plural forms, plus `-ie` and `-che` nouns the suffix rules would mangle.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("dice", "die"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("wolves", "wolf"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("thieves", "thief"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("buses", "bus"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("rookies", "rookie"),
    ("calories", "calorie"),
    ("selfies", "selfie"),
    ("pies", "pie"),
    ("ties", "tie"),
    ("lies", "lie"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("headaches", "headache"),
    ("avalanches", "avalanche"),
    ("moustaches", "moustache"),
    ("psyches", "psyche"),
];

/// Words ending in `s` that are not plurals.
const INVARIANT_WORDS: &[&str] = &[
    "series", "species", "news", "always", "perhaps", "whereas", "bias", "lens", "atlas",
    "canvas", "chaos", "pathos", "ethos", "cosmos", "corps", "mumps", "means", "towards",
    "afterwards", "besides", "sometimes", "nowadays", "hers", "ours", "yours", "theirs",
];

/// Suffix rules, tried in order: `(suffix, replacement)`.
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("men", "man"),
    ("s", ""),
];

/// Endings that mark a word as already singular.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ics"];

/// Shortest word the detachment rules apply to.
const MIN_RULE_LEN: usize = 4;

/// English noun lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    /// Irregular form -> lemma.
    exceptions: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Lemmatizer {
    /// Lemmatizer with the built-in irregular forms.
    #[must_use]
    pub fn english() -> Self {
        let exceptions = IRREGULAR_NOUNS
            .iter()
            .map(|(from, to)| (String::from(*from), String::from(*to)))
            .chain(
                INVARIANT_WORDS
                    .iter()
                    .map(|word| (String::from(*word), String::from(*word))),
            )
            .collect();
        Self { exceptions }
    }

    /// Adds or overrides an irregular form.
    #[must_use]
    pub fn with_exception(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.exceptions.insert(from.into(), to.into());
        self
    }

    /// Returns the lemma of `word`, or `word` unchanged if no rule applies.
    ///
    /// Words containing upper-case or non-alphabetic characters are treated
    /// as proper nouns or non-words and returned as-is.
    #[must_use]
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if !word.chars().all(|c| c.is_alphabetic() && c.is_lowercase()) {
            return String::from(word);
        }
        if word.chars().count() < MIN_RULE_LEN
            || SINGULAR_ENDINGS.iter().any(|end| word.ends_with(end))
        {
            return String::from(word);
        }

        for (suffix, replacement) in DETACHMENT_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.chars().count() < 2 {
                    break;
                }
                return format!("{stem}{replacement}");
            }
        }
        String::from(word)
    }
}
