//! Metadata fetcher/aggregator.
//!
//! Turns a batch of title/year/kind queries into a table with one row per
//! query, issuing the lookups concurrently and keeping input order.

mod error;
mod fetcher;
mod types;

pub use error::PreconditionError;
pub use fetcher::{default_concurrency, fetch_batch, fetch_queries, fetch_single};
pub use types::{MediaKind, QueryItem, RESULT_COLUMNS, ResultRecord, ResultTable};
