//! TMDB API response types and search parameters.
//!
//! Only presence/absence is checked on search hits: every field is optional
//! so a sparse entry still deserializes, while a wrongly-typed payload fails.

use serde::Deserialize;

// --- Search TV ---

/// Response from `search/tv` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbSearchTvResponse {
    /// Current page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Search results, ranked by the provider. Missing means no match.
    #[serde(default)]
    pub results: Vec<TmdbTvSearchResult>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: Option<u32>,
}

/// A single TV series search result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbTvSearchResult {
    /// TMDB series ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Localized name.
    #[serde(default)]
    pub name: Option<String>,
    /// First air date (YYYY-MM-DD or null).
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
}

// --- Search Movie ---

/// Response from `search/movie` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbSearchMovieResponse {
    /// Current page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Search results, ranked by the provider. Missing means no match.
    #[serde(default)]
    pub results: Vec<TmdbMovieSearchResult>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: Option<u32>,
}

/// A single movie search result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieSearchResult {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Release date (YYYY-MM-DD or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u32>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/tv` endpoint.
///
/// TV searches never carry a year filter.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Result page (always 1; only the first page is consulted).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (always 1; only the first page is consulted).
    pub page: u32,
    /// Filter by release year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}
