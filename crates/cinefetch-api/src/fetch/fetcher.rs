//! Parallel lookup of a batch of queries against the TMDB search API.

use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::instrument;

use super::error::PreconditionError;
use super::types::{MediaKind, QueryItem, ResultRecord, ResultTable};
use crate::tmdb::{LocalTmdbApi, SearchMovieParams, SearchTvParams};

/// Upper bound on in-flight lookups.
const MAX_WORKERS: usize = 32;

/// Extra workers on top of the CPU count (lookups are I/O bound).
const IO_WORKER_HEADROOM: usize = 4;

/// Number of lookups kept in flight by [`fetch_batch`].
///
/// Host default: `min(32, available_parallelism + 4)`.
#[must_use]
pub fn default_concurrency() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    cpus.saturating_add(IO_WORKER_HEADROOM).min(MAX_WORKERS)
}

/// Looks up a single query and returns its row.
///
/// Movies search `search/movie` with the year filter when a year is given;
/// shows search `search/tv` and never send a year. The first-ranked hit
/// wins. A response without hits yields [`ResultRecord::no_match`].
///
/// # Errors
///
/// Returns [`PreconditionError::EmptyQuery`] (wrapped) if the title is
/// blank. Otherwise returns an error if the request fails, the provider
/// answers with a non-success status, or the body is malformed.
#[instrument(skip_all, fields(title = %query.title, kind = %query.kind))]
pub async fn fetch_single(
    api: &(impl LocalTmdbApi + Sync),
    query: &QueryItem,
) -> Result<ResultRecord> {
    if query.title.trim().is_empty() {
        return Err(PreconditionError::EmptyQuery.into());
    }

    let record = match query.kind {
        MediaKind::Movie => {
            let mut params = SearchMovieParams::new(&query.title);
            if let Some(year) = query.year {
                params = params.year(year);
            }
            let response = api.search_movie(&params).await?;
            response
                .results
                .into_iter()
                .next()
                .map(|hit| ResultRecord::from_movie(&query.title, hit))
        }
        MediaKind::Show => {
            let params = SearchTvParams::new(&query.title);
            let response = api.search_tv(&params).await?;
            response
                .results
                .into_iter()
                .next()
                .map(|hit| ResultRecord::from_show(&query.title, hit))
        }
    };

    Ok(record.unwrap_or_else(|| {
        tracing::debug!("No match");
        ResultRecord::no_match(&query.title)
    }))
}

/// Looks up parallel `titles` / `years` / `kinds` slices.
///
/// Zips the slices into [`QueryItem`]s and delegates to [`fetch_queries`].
///
/// # Errors
///
/// Returns [`PreconditionError::LengthMismatch`] (wrapped) before any request
/// if the slices differ in length, plus every error of [`fetch_queries`].
pub async fn fetch_batch(
    api: &(impl LocalTmdbApi + Sync),
    titles: &[String],
    years: &[Option<u32>],
    kinds: &[MediaKind],
) -> Result<ResultTable> {
    if titles.len() != years.len() || titles.len() != kinds.len() {
        return Err(PreconditionError::LengthMismatch {
            titles: titles.len(),
            years: years.len(),
            kinds: kinds.len(),
        }
        .into());
    }

    let queries: Vec<QueryItem> = titles
        .iter()
        .zip(years)
        .zip(kinds)
        .map(|((title, year), kind)| QueryItem::new(title.as_str(), *year, *kind))
        .collect();

    fetch_queries(api, &queries).await
}

/// Looks up every query concurrently and returns rows in input order.
///
/// At most [`default_concurrency`] lookups are in flight. Rows are collected
/// in submission order, so the table is aligned with `queries` no matter
/// which responses arrive first.
///
/// All-or-nothing: the first failed lookup fails the whole call and no
/// table is returned.
///
/// # Errors
///
/// Returns [`PreconditionError::EmptyTitle`] (wrapped) before any request if
/// a title is blank, or the first lookup error, annotated with the item's
/// index and title.
#[instrument(skip_all, fields(items = queries.len()))]
pub async fn fetch_queries(
    api: &(impl LocalTmdbApi + Sync),
    queries: &[QueryItem],
) -> Result<ResultTable> {
    if let Some(index) = queries.iter().position(|q| q.title.trim().is_empty()) {
        return Err(PreconditionError::EmptyTitle { index }.into());
    }

    let workers = default_concurrency();
    tracing::debug!(items = queries.len(), workers, "Starting batch lookup");

    let rows: Vec<ResultRecord> = stream::iter(queries.iter().enumerate())
        .map(move |(index, query)| async move {
            fetch_single(api, query)
                .await
                .with_context(|| format!("lookup failed for item {index} ({:?})", query.title))
        })
        .buffered(workers)
        .try_collect()
        .await?;

    let table = ResultTable::new(rows);
    tracing::info!(
        items = table.len(),
        matched = table.matched(),
        unmatched = table.len().saturating_sub(table.matched()),
        "Batch lookup complete"
    );

    Ok(table)
}
