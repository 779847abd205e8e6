//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    SearchMovieParams, SearchTvParams, TmdbSearchMovieResponse, TmdbSearchTvResponse,
};

/// TMDB search API trait.
///
/// Abstracts the two search endpoints so the fetcher can run against
/// an in-process mock in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for TV series (first page only).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the provider answers with
    /// a non-success status, or the JSON body cannot be decoded.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse>;

    /// Searches for movies (first page only).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the provider answers with
    /// a non-success status, or the JSON body cannot be decoded.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse>;
}
