//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 search endpoints
//! for movies and TV series.

mod api;
mod client;
mod credential;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use credential::Credential;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    SearchMovieParams, SearchTvParams, TmdbMovieSearchResult, TmdbSearchMovieResponse,
    TmdbSearchTvResponse, TmdbTvSearchResult,
};
