//! Metadata extraction from release titles.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

use crate::searcher::TorrentCandidate;

static QUALITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d{3,4}p)").unwrap());
static RELEASE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\]").unwrap());

/// Lower-cased markers of French subtitles (or multi-sub packs that carry them).
const FRENCH_KEYWORDS: [&str; 9] = [
    "vostfr",
    "french",
    "français",
    "francais",
    "multisub",
    "multi-sub",
    "multi sub",
    "multi-subs",
    "multisubs",
];

const FLAG_FR: &str = "🇫🇷";
const FLAG_JP: &str = "🇯🇵";
const FLAG_GB: &str = "🇬🇧";

/// Language classification of a release title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub is_french: bool,
    /// Flag emoji for display, e.g. "🇫🇷🇯🇵".
    pub flags: String,
}

/// A search row with its classification attached.
///
/// Computed once per candidate; presentation reads these fields instead of
/// re-parsing the title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCandidate {
    pub candidate: TorrentCandidate,
    pub quality: Option<String>,
    pub release_group: Option<String>,
    pub is_french: bool,
    pub flags: String,
}

/// First resolution tag in the title ("1080p"), lower-cased.
pub fn extract_quality(title: &str) -> Option<String> {
    QUALITY
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Leading bracketed group name: `[Erai-raws] Title ...` -> `Erai-raws`.
pub fn extract_release_group(title: &str) -> Option<String> {
    RELEASE_GROUP
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn has_french_subtitles(title: &str) -> bool {
    let lower = title.to_lowercase();
    FRENCH_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Classify the title's subtitle language and build its display flags.
///
/// Nyaa's English-translated category defaults to English; a Japanese flag is
/// appended for multi/dual audio French releases and for explicit JPN tags.
pub fn language_info(title: &str) -> LanguageInfo {
    let lower = title.to_lowercase();
    let is_french = has_french_subtitles(title);

    let mut flags = String::new();
    if is_french {
        flags.push_str(FLAG_FR);
        if lower.contains("multi") || lower.contains("dual") {
            flags.push_str(FLAG_JP);
        }
    } else {
        flags.push_str(FLAG_GB);
        if lower.contains("jpn") || lower.contains("japanese") {
            flags.push_str(FLAG_JP);
        }
    }

    LanguageInfo { is_french, flags }
}

/// Attach quality, release group and language info to a candidate.
pub fn enrich(candidate: TorrentCandidate) -> EnrichedCandidate {
    let quality = extract_quality(&candidate.title);
    let release_group = extract_release_group(&candidate.title);
    let LanguageInfo { is_french, flags } = language_info(&candidate.title);

    EnrichedCandidate {
        candidate,
        quality,
        release_group,
        is_french,
        flags,
    }
}
