use serde::{Deserialize, Serialize};

use crate::ranking::EnrichedCandidate;

/// Label shown in the Stremio source column.
pub const STREAM_NAME: &str = "Nyaa.si";

/// Stremio stream record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub name: String,
    pub title: String,
    /// Magnet URI.
    pub url: String,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    /// Streams sharing a group are auto-selected for the next episode.
    pub binge_group: String,
}

/// Format a ranked candidate for Stremio.
///
/// Title layout: `[group] quality flags [❌ ]👤 seeders | 💾 size`. The group
/// and quality segments are omitted when unknown; `❌` marks releases without
/// French subtitles.
pub fn to_stream(candidate: &EnrichedCandidate) -> Stream {
    let mut title = String::new();

    if let Some(group) = &candidate.release_group {
        title.push_str(&format!("[{}] ", group));
    }
    if let Some(quality) = &candidate.quality {
        title.push_str(&format!("{} ", quality));
    }
    title.push_str(&format!("{} ", candidate.flags));
    if !candidate.is_french {
        title.push_str("❌ ");
    }
    title.push_str(&format!(
        "👤 {} | 💾 {}",
        candidate.candidate.seeders, candidate.candidate.size
    ));

    Stream {
        name: STREAM_NAME.to_string(),
        title,
        url: candidate.candidate.magnet_uri.clone(),
        behavior_hints: BehaviorHints {
            binge_group: format!(
                "nyaa-{}",
                candidate.release_group.as_deref().unwrap_or("default")
            ),
        },
    }
}
