use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::title::AliasTable;

/// Season/episode position of a series episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonEpisode {
    pub season: u32,
    pub episode: u32,
}

impl SeasonEpisode {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

/// English ordinal for a number: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Ordered, duplicate-free list of queries under construction.
#[derive(Default)]
struct QueryList {
    queries: Vec<String>,
    seen: HashSet<String>,
}

impl QueryList {
    fn push(&mut self, query: String) {
        if self.seen.insert(query.clone()) {
            self.queries.push(query);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.queries
    }
}

/// Template-based query builder.
///
/// Generates, in priority order:
/// 1. `Title S01E03`
/// 2. `Title 1st Season - 03`
/// 3. `Title S1 - 03`
/// 4. `Title - 03`
/// 5. The ordinal, zero-padded and bare forms for every alias of the title
///    and of every alias key contained in the title.
///
/// Movies get the bare title followed by the exact-match aliases.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    aliases: Arc<AliasTable>,
}

impl QueryBuilder {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Build queries for a normalized title.
    ///
    /// Returns an empty list for an empty title.
    pub fn build(&self, title: &str, episode: Option<SeasonEpisode>) -> Vec<String> {
        if title.is_empty() {
            return Vec::new();
        }

        match episode {
            Some(se) => self.series_queries(title, se),
            None => self.movie_queries(title),
        }
    }

    fn series_queries(&self, title: &str, se: SeasonEpisode) -> Vec<String> {
        let mut queries = QueryList::default();
        let ep = format!("{:02}", se.episode);
        let season_padded = format!("{:02}", se.season);
        let season_ordinal = ordinal(se.season);

        queries.push(format!("{} S{}E{}", title, season_padded, ep));
        queries.push(format!("{} {} Season - {}", title, season_ordinal, ep));
        queries.push(format!("{} S{} - {}", title, se.season, ep));
        queries.push(format!("{} - {}", title, ep));

        let exact = self.aliases.get(title).into_iter().flatten();
        let contained = self
            .aliases
            .contained_in(title)
            .flat_map(|entry| entry.alternates.iter());

        for alias in exact.chain(contained) {
            queries.push(format!("{} {} Season - {}", alias, season_ordinal, ep));
            queries.push(format!("{} S{}E{}", alias, season_padded, ep));
            queries.push(format!("{} - {}", alias, ep));
        }

        queries.into_vec()
    }

    fn movie_queries(&self, title: &str) -> Vec<String> {
        let mut queries = QueryList::default();
        queries.push(title.to_string());

        if let Some(alternates) = self.aliases.get(title) {
            for alias in alternates {
                queries.push(alias.clone());
            }
        }

        queries.into_vec()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(Arc::new(AliasTable::default()))
    }
}
