//! Search query generation.
//!
//! Release groups disagree on episode naming: zero-padded `S01E03`, ordinal
//! seasons (`2nd Season - 03`), short seasons (`S2 - 03`) or a bare episode
//! number. The index has no fuzzy matching, so several cheap variants are
//! generated and tried in order.

mod builder;

pub use builder::{ordinal, QueryBuilder, SeasonEpisode};
