use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::ranking::RankingPolicy;
use crate::title::{AliasEntry, AliasTable};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ranking: RankingPolicy,
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Replaces the built-in alias table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<AliasEntry>>,
}

impl Config {
    /// Alias table to inject into the query builder.
    pub fn alias_table(&self) -> AliasTable {
        match &self.aliases {
            Some(entries) => AliasTable::from_entries(entries.clone()),
            None => AliasTable::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    7000
}

/// Torrent index (nyaa.si) client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Index base URL (e.g., "https://nyaa.si")
    #[serde(default = "default_index_url")]
    pub base_url: String,
    /// Category code ("1_2" = Anime, English-translated)
    #[serde(default = "default_category")]
    pub category: String,
    /// Filter code ("0" = no filter, "1" = no remakes, "2" = trusted only)
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Sort key (seeders, size, date, downloads)
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (desc, asc)
    #[serde(default = "default_order")]
    pub order: String,
    /// Per-query request timeout in seconds (default: 15)
    #[serde(default = "default_index_timeout")]
    pub timeout_secs: u32,
    /// User-Agent header sent to the index
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: default_index_url(),
            category: default_category(),
            filter: default_filter(),
            sort: default_sort(),
            order: default_order(),
            timeout_secs: default_index_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_index_url() -> String {
    "https://nyaa.si".to_string()
}

fn default_category() -> String {
    "1_2".to_string()
}

fn default_filter() -> String {
    "0".to_string()
}

fn default_sort() -> String {
    "seeders".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

fn default_index_timeout() -> u32 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

/// Candidate aggregation limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Stop issuing queries once this many distinct candidates are collected.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_max_candidates() -> usize {
    30
}

/// Identifier resolution backends
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// TMDB backend for `tt` identifiers (disabled when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<TmdbConfig>,
    /// Kitsu backend for `kitsu:` identifiers (no key required).
    #[serde(default)]
    pub kitsu: KitsuConfig,
}

/// TMDB client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default = "default_tmdb_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_resolver_timeout")]
    pub timeout_secs: u32,
}

/// Kitsu client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KitsuConfig {
    /// Base URL (default: https://kitsu.io/api/edge).
    #[serde(default = "default_kitsu_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_resolver_timeout")]
    pub timeout_secs: u32,
}

impl Default for KitsuConfig {
    fn default() -> Self {
        Self {
            base_url: default_kitsu_url(),
            timeout_secs: default_resolver_timeout(),
        }
    }
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_kitsu_url() -> String {
    "https://kitsu.io/api/edge".to_string()
}

fn default_resolver_timeout() -> u32 {
    5
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub ranking: RankingPolicy,
    pub resolver: SanitizedResolverConfig,
    pub alias_count: usize,
}

/// Sanitized resolver config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedResolverConfig {
    pub tmdb_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_base_url: Option<String>,
    pub kitsu_base_url: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            index: config.index.clone(),
            search: config.search.clone(),
            ranking: config.ranking.clone(),
            resolver: SanitizedResolverConfig {
                tmdb_configured: config
                    .resolver
                    .tmdb
                    .as_ref()
                    .is_some_and(|t| !t.api_key.is_empty()),
                tmdb_base_url: config.resolver.tmdb.as_ref().map(|t| t.base_url.clone()),
                kitsu_base_url: config.resolver.kitsu.base_url.clone(),
            },
            alias_count: config.alias_table().len(),
        }
    }
}
