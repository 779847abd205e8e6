//! Query items, result records and the result table.

use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::tmdb::{TmdbMovieSearchResult, TmdbTvSearchResult};

/// Media type of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum MediaKind {
    /// Feature film, looked up via `search/movie`.
    Movie,
    /// TV series, looked up via `search/tv`.
    Show,
}

impl MediaKind {
    /// Upper-case tag (`MOVIE` / `SHOW`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Show => "SHOW",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MOVIE" => Ok(Self::Movie),
            "SHOW" | "TV" => Ok(Self::Show),
            other => bail!("unknown media kind: {other:?} (expected MOVIE or SHOW)"),
        }
    }
}

impl TryFrom<String> for MediaKind {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// One title/year/kind triple submitted for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryItem {
    /// Search term.
    pub title: String,
    /// Release year; only used for movies.
    #[serde(default)]
    pub year: Option<u32>,
    /// Media type.
    pub kind: MediaKind,
}

impl QueryItem {
    /// Creates a query item.
    pub fn new(title: impl Into<String>, year: Option<u32>, kind: MediaKind) -> Self {
        Self {
            title: title.into(),
            year,
            kind,
        }
    }
}

/// Per-item output row.
///
/// Everything but `title` is `None` when the provider had no match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// Query title, echoed back.
    pub title: String,
    /// Release date (movies) or first air date (shows).
    pub year: Option<String>,
    /// TMDB ID of the top match.
    pub provider_id: Option<u64>,
    /// Overview text.
    pub synopsis: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Average rating.
    pub rating_average: Option<f64>,
    /// Number of ratings.
    pub rating_count: Option<u32>,
}

/// Column order of [`ResultTable::write_csv`].
pub const RESULT_COLUMNS: [&str; 7] = [
    "title",
    "year",
    "provider_id",
    "synopsis",
    "popularity",
    "rating_average",
    "rating_count",
];

impl ResultRecord {
    /// Record for a query with no match.
    pub fn no_match(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            provider_id: None,
            synopsis: None,
            popularity: None,
            rating_average: None,
            rating_count: None,
        }
    }

    /// Record built from the top movie hit.
    pub fn from_movie(title: impl Into<String>, hit: TmdbMovieSearchResult) -> Self {
        Self {
            title: title.into(),
            year: hit.release_date,
            provider_id: hit.id,
            synopsis: hit.overview,
            popularity: hit.popularity,
            rating_average: hit.vote_average,
            rating_count: hit.vote_count,
        }
    }

    /// Record built from the top TV hit.
    pub fn from_show(title: impl Into<String>, hit: TmdbTvSearchResult) -> Self {
        Self {
            title: title.into(),
            year: hit.first_air_date,
            provider_id: hit.id,
            synopsis: hit.overview,
            popularity: hit.popularity,
            rating_average: hit.vote_average,
            rating_count: hit.vote_count,
        }
    }

    /// Returns `true` if the provider found a match for this row.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.provider_id.is_some()
    }
}

/// Ordered rows, positionally aligned with the input queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRecord>,
}

impl ResultTable {
    /// Wraps rows that are already in input order.
    #[must_use]
    pub const fn new(rows: Vec<ResultRecord>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in input order.
    #[must_use]
    pub fn rows(&self) -> &[ResultRecord] {
        &self.rows
    }

    /// Iterates rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.rows.iter()
    }

    /// Number of rows with a provider match.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.rows.iter().filter(|r| r.is_match()).count()
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<ResultRecord> {
        self.rows
    }

    /// Writes the table as CSV with a header row.
    ///
    /// Absent fields become empty cells.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer
            .write_record(RESULT_COLUMNS)
            .context("failed to write CSV header")?;
        for row in &self.rows {
            csv_writer
                .serialize(row)
                .with_context(|| format!("failed to write CSV row for {:?}", row.title))?;
        }
        csv_writer.flush().context("failed to flush CSV output")
    }

    /// Writes the table as a pretty-printed JSON array.
    ///
    /// Absent fields become `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.rows)
            .context("failed to write JSON output")?;
        writer
            .write_all(b"\n")
            .context("failed to write JSON output")?;
        writer.flush().context("failed to flush JSON output")
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ResultTable {
    type Item = ResultRecord;
    type IntoIter = std::vec::IntoIter<ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
