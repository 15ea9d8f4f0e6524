pub mod addon;
pub mod config;
pub mod metrics;
pub mod query;
pub mod ranking;
pub mod resolver;
pub mod searcher;
pub mod testing;
pub mod title;

pub use addon::{
    to_stream, BehaviorHints, ContentId, ContentType, Manifest, Stream, StreamHandler,
    StreamRequest,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use query::{QueryBuilder, SeasonEpisode};
pub use ranking::{enrich, rank_candidates, EnrichedCandidate, RankingPolicy};
pub use resolver::{CombinedResolver, KitsuResolver, ResolveError, TitleResolver, TmdbResolver};
pub use searcher::{
    aggregate_candidates, AggregationResult, NyaaSearcher, SearchError, SearchOptions,
    SearchQuery, Searcher, TorrentCandidate,
};
pub use title::{normalize_title, AliasEntry, AliasTable};
