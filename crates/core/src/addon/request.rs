use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::SeasonEpisode;

/// Stremio content type of a stream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed Stremio video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentId {
    /// `tt1234567` or `tt1234567:season:episode`.
    Imdb {
        id: String,
        episode: Option<SeasonEpisode>,
    },
    /// `kitsu:42`, `kitsu:42:episode` or `kitsu:42:season:episode`.
    Kitsu {
        id: String,
        episode: Option<SeasonEpisode>,
    },
}

impl ContentId {
    /// Parse a Stremio identifier. Returns `None` for unsupported or malformed ids.
    ///
    /// Kitsu ids that carry only an episode number are treated as season 1.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(':').collect();

        match parts.as_slice() {
            [id, rest @ ..] if is_imdb_id(id) => {
                let episode = match rest {
                    [] => None,
                    [season, episode] => Some(parse_season_episode(season, episode)?),
                    _ => return None,
                };
                Some(Self::Imdb {
                    id: id.to_string(),
                    episode,
                })
            }
            ["kitsu", id, rest @ ..] if is_numeric(id) => {
                let episode = match rest {
                    [] => None,
                    [episode] => Some(parse_season_episode("1", episode)?),
                    [season, episode] => Some(parse_season_episode(season, episode)?),
                    _ => return None,
                };
                Some(Self::Kitsu {
                    id: id.to_string(),
                    episode,
                })
            }
            _ => None,
        }
    }

    /// The bare catalog id (without prefix or episode position).
    pub fn id(&self) -> &str {
        match self {
            Self::Imdb { id, .. } | Self::Kitsu { id, .. } => id,
        }
    }

    pub fn episode(&self) -> Option<SeasonEpisode> {
        match self {
            Self::Imdb { episode, .. } | Self::Kitsu { episode, .. } => *episode,
        }
    }

    /// Short backend label for logs and metrics.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Imdb { .. } => "imdb",
            Self::Kitsu { .. } => "kitsu",
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imdb { id, .. } => write!(f, "{}", id)?,
            Self::Kitsu { id, .. } => write!(f, "kitsu:{}", id)?,
        }
        if let Some(se) = self.episode() {
            write!(f, ":{}:{}", se.season, se.episode)?;
        }
        Ok(())
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_imdb_id(s: &str) -> bool {
    s.strip_prefix("tt").is_some_and(is_numeric)
}

fn parse_season_episode(season: &str, episode: &str) -> Option<SeasonEpisode> {
    let season: u32 = season.parse().ok()?;
    let episode: u32 = episode.parse().ok()?;
    if season == 0 || episode == 0 {
        return None;
    }
    Some(SeasonEpisode::new(season, episode))
}

/// One stream request from a Stremio client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub content_type: ContentType,
    /// Raw identifier as sent by the client.
    pub id: String,
    /// Title already known to the client, when it sends one.
    pub name: Option<String>,
}

impl StreamRequest {
    pub fn new(content_type: ContentType, id: impl Into<String>) -> Self {
        Self {
            content_type,
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Episode position used for query generation.
    ///
    /// Only series requests search by episode; a movie id with a position is
    /// searched by title.
    pub fn search_episode(&self, content_id: &ContentId) -> Option<SeasonEpisode> {
        match self.content_type {
            ContentType::Series => content_id.episode(),
            ContentType::Movie => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parse() {
        assert_eq!(ContentType::parse("movie"), Some(ContentType::Movie));
        assert_eq!(ContentType::parse("series"), Some(ContentType::Series));
        assert_eq!(ContentType::parse("channel"), None);
        assert_eq!(ContentType::Series.to_string(), "series");
    }

    #[test]
    fn test_parse_imdb() {
        assert_eq!(
            ContentId::parse("tt0388629"),
            Some(ContentId::Imdb {
                id: "tt0388629".into(),
                episode: None
            })
        );
        assert_eq!(
            ContentId::parse("tt0388629:2:13"),
            Some(ContentId::Imdb {
                id: "tt0388629".into(),
                episode: Some(SeasonEpisode::new(2, 13))
            })
        );
    }

    #[test]
    fn test_parse_kitsu() {
        assert_eq!(
            ContentId::parse("kitsu:46474"),
            Some(ContentId::Kitsu {
                id: "46474".into(),
                episode: None
            })
        );
        assert_eq!(
            ContentId::parse("kitsu:46474:7").unwrap().episode(),
            Some(SeasonEpisode::new(1, 7))
        );
        assert_eq!(
            ContentId::parse("kitsu:46474:2:7").unwrap().episode(),
            Some(SeasonEpisode::new(2, 7))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ContentId::parse(""), None);
        assert_eq!(ContentId::parse("tt"), None);
        assert_eq!(ContentId::parse("ttabc"), None);
        assert_eq!(ContentId::parse("tt123:1"), None);
        assert_eq!(ContentId::parse("tt123:0:1"), None);
        assert_eq!(ContentId::parse("tt123:1:x"), None);
        assert_eq!(ContentId::parse("kitsu:"), None);
        assert_eq!(ContentId::parse("kitsu:abc"), None);
        assert_eq!(ContentId::parse("kitsu:1:2:3:4"), None);
        assert_eq!(ContentId::parse("mal:123"), None);
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["tt123", "tt123:1:2", "kitsu:9", "kitsu:9:3:4"] {
            assert_eq!(ContentId::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_search_episode_only_for_series() {
        let id = ContentId::parse("tt123:1:2").unwrap();
        let series = StreamRequest::new(ContentType::Series, "tt123:1:2");
        let movie = StreamRequest::new(ContentType::Movie, "tt123:1:2");

        assert_eq!(series.search_episode(&id), Some(SeasonEpisode::new(1, 2)));
        assert_eq!(movie.search_episode(&id), None);
    }
}
