use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::EnrichedCandidate;

/// Filtering and ordering preferences for ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    /// Drop candidates without French subtitles.
    #[serde(default = "default_require_french_subs")]
    pub require_french_subs: bool,
    /// Release groups ranked ahead of others (case-insensitive).
    #[serde(default = "default_preferred_groups")]
    pub preferred_groups: Vec<String>,
    /// Qualities ranked by position; earlier is better.
    #[serde(default = "default_preferred_qualities")]
    pub preferred_qualities: Vec<String>,
    /// Maximum number of results returned.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_require_french_subs() -> bool {
    true
}

fn default_preferred_groups() -> Vec<String> {
    vec!["Erai-raws".to_string(), "erai-raws".to_string()]
}

fn default_preferred_qualities() -> Vec<String> {
    ["1080p", "720p", "4k", "2160p"]
        .iter()
        .map(|q| q.to_string())
        .collect()
}

fn default_max_results() -> usize {
    20
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            require_french_subs: default_require_french_subs(),
            preferred_groups: default_preferred_groups(),
            preferred_qualities: default_preferred_qualities(),
            max_results: default_max_results(),
        }
    }
}

impl RankingPolicy {
    fn is_preferred_group(&self, group: Option<&str>) -> bool {
        group.is_some_and(|g| {
            self.preferred_groups
                .iter()
                .any(|p| p.to_lowercase() == g.to_lowercase())
        })
    }

    fn quality_rank(&self, quality: Option<&str>) -> Option<usize> {
        quality.and_then(|q| self.preferred_qualities.iter().position(|p| p == q))
    }

    /// Ordering between two candidates; `Less` means `a` ranks first.
    ///
    /// Tiers: French subtitles, preferred group, listed quality (by list
    /// position, listed ahead of unlisted), then seeders descending.
    pub fn compare(&self, a: &EnrichedCandidate, b: &EnrichedCandidate) -> Ordering {
        b.is_french
            .cmp(&a.is_french)
            .then_with(|| {
                let a_group = self.is_preferred_group(a.release_group.as_deref());
                let b_group = self.is_preferred_group(b.release_group.as_deref());
                b_group.cmp(&a_group)
            })
            .then_with(|| {
                match (
                    self.quality_rank(a.quality.as_deref()),
                    self.quality_rank(b.quality.as_deref()),
                ) {
                    (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            })
            .then_with(|| b.candidate.seeders.cmp(&a.candidate.seeders))
    }
}

/// Filter, order and cap enriched candidates.
///
/// The sort is stable: candidates equal on every tier keep discovery order.
/// Missing quality or group only lowers a candidate's rank.
pub fn rank_candidates(
    candidates: Vec<EnrichedCandidate>,
    policy: &RankingPolicy,
) -> Vec<EnrichedCandidate> {
    let mut ranked: Vec<EnrichedCandidate> = candidates
        .into_iter()
        .filter(|c| !policy.require_french_subs || c.is_french)
        .collect();

    ranked.sort_by(|a, b| policy.compare(a, b));
    ranked.truncate(policy.max_results);
    ranked
}
