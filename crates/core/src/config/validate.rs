use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Refresh interval is not 0
/// - Recommendation limit and genre count are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.refresh.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "refresh.interval_secs cannot be 0".to_string(),
        ));
    }

    if config.recommendations.limit == 0 {
        return Err(ConfigError::ValidationError(
            "recommendations.limit cannot be 0".to_string(),
        ));
    }

    if config.recommendations.top_genres == 0 {
        return Err(ConfigError::ValidationError(
            "recommendations.top_genres cannot be 0".to_string(),
        ));
    }

    Ok(())
}
