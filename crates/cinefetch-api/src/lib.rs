//! API client library for cinefetch.
//!
//! Provides the TMDB search client and the batch metadata fetcher built on it.

/// Batch metadata fetcher.
pub mod fetch;

/// TMDB API client.
pub mod tmdb;
