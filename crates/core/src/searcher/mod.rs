//! Torrent search abstraction.
//!
//! This module provides a `Searcher` trait for querying a torrent index, the
//! Nyaa HTML backend, and the sequential multi-query aggregator that feeds the
//! ranking stage.

mod aggregate;
mod nyaa;
mod parser;
mod types;

pub use aggregate::{aggregate_candidates, AggregationResult, StopReason};
pub use nyaa::NyaaSearcher;
pub use parser::parse_search_page;
pub use types::*;
