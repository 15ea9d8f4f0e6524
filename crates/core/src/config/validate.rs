use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Index base URL is set and absolute
/// - Candidate and result caps are non-zero
/// - Alias entries have a canonical name and no empty alternates
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let base_url = config.index.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "index.base_url must be an http(s) URL, got {:?}",
            config.index.base_url
        )));
    }

    if config.index.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "index.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.search.max_candidates == 0 {
        return Err(ConfigError::ValidationError(
            "search.max_candidates cannot be 0".to_string(),
        ));
    }

    if config.ranking.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "ranking.max_results cannot be 0".to_string(),
        ));
    }

    if let Some(entries) = &config.aliases {
        for entry in entries {
            if entry.canonical.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "aliases: canonical name cannot be empty".to_string(),
                ));
            }
            if entry.alternates.iter().any(|a| a.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "aliases: empty alternate for {:?}",
                    entry.canonical
                )));
            }
        }
    }

    Ok(())
}
