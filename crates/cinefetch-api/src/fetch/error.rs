//! Precondition failures detected before any request is sent.

/// Invalid lookup input.
///
/// Returned wrapped in `anyhow::Error`; callers that need to branch on it
/// can `downcast_ref::<PreconditionError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// `titles`, `years` and `kinds` differ in length.
    LengthMismatch {
        /// Number of titles.
        titles: usize,
        /// Number of years.
        years: usize,
        /// Number of kinds.
        kinds: usize,
    },
    /// The title of a single lookup is empty or whitespace only.
    EmptyQuery,
    /// A batch item's title is empty or whitespace only.
    EmptyTitle {
        /// Position of the offending item in the batch.
        index: usize,
    },
}

impl std::fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                titles,
                years,
                kinds,
            } => write!(
                f,
                "input length mismatch: {titles} titles, {years} years, {kinds} kinds"
            ),
            Self::EmptyQuery => f.write_str("empty title"),
            Self::EmptyTitle { index } => write!(f, "empty title at index {index}"),
        }
    }
}

impl std::error::Error for PreconditionError {}
