//! Text normalization for cinefetch.
//!
//! Stopword removal and lemmatization of free-text columns such as
//! synopses. All linguistic resources live in an explicitly constructed
//! [`TextNormalizer`]; nothing is loaded at process start.

/// Noun lemmatizer.
pub mod lemmatizer;
/// Pipeline combining stopwords and lemmatizer.
pub mod normalizer;
/// Stopword sets.
pub mod stopwords;
/// Word tokenizer.
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use stopwords::StopwordFilter;
pub use tokenizer::tokenize;
