use crate::config::types::{Config, OutputConfig, ScrapeConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scrape pipeline configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url: {}", e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must be http(s), got scheme '{}'",
            seed.scheme()
        )));
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url must include a host".to_string(),
        ));
    }

    if config.page_load_timeout_ms < 1_000 {
        return Err(ConfigError::Validation(format!(
            "page-load-timeout-ms must be >= 1000ms, got {}ms",
            config.page_load_timeout_ms
        )));
    }

    if config.container_wait_timeout_ms < 1_000 {
        return Err(ConfigError::Validation(format!(
            "container-wait-timeout-ms must be >= 1000ms, got {}ms",
            config.container_wait_timeout_ms
        )));
    }

    if config.pause_min_ms > config.pause_max_ms {
        return Err(ConfigError::Validation(format!(
            "pause-min-ms ({}) must not exceed pause-max-ms ({})",
            config.pause_min_ms, config.pause_max_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
