//! Platform fetch scheduler.
//!
//! Fans one fetch-parse task out per platform onto a bounded pool, merges
//! completions as they arrive and reports progress after each one.
//! Pipeline per platform: fetch (curl GET) → parser → aggregate.

mod aggregate;
mod fetcher;
mod parallel;
mod progress;
mod sequential;
mod task;

pub use aggregate::{FetchReport, NameMap, ResultSet};
pub use fetcher::{parallel_fetch_all, ParallelFetcher};
pub use progress::FetchProgress;
