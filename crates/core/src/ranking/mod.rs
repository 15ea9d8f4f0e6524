//! Candidate classification, filtering and ranking.
//!
//! Each search row is classified once (quality, release group, subtitle
//! language) and then filtered and ordered by a [`RankingPolicy`].

mod classify;
mod engine;

pub use classify::{
    enrich, extract_quality, extract_release_group, has_french_subtitles, language_info,
    EnrichedCandidate, LanguageInfo,
};
pub use engine::{rank_candidates, RankingPolicy};
