pub mod settings;

// Re-export the primary Config struct for a cleaner import path.
pub use settings::Config;

use crate::error::FeedError;
use std::sync::Arc;

/// Loads and returns the application configuration as an `Arc<Config>`.
/// It centralizes the configuration loading process.
pub fn load_config() -> Result<Arc<settings::Config>, FeedError> {
    dotenv::dotenv().ok(); // Load .env file if present, ignore errors

    let config = settings::Config::from_env();

    if config.api_base_url.is_empty() {
        return Err(FeedError::ConfigError(
            "API_BASE_URL cannot be empty".to_string(),
        ));
    }
    if config.cache_ttl_ms == 0 {
        return Err(FeedError::ConfigError(
            "CACHE_TTL_MS must be greater than zero".to_string(),
        ));
    }

    config.validate_and_log();

    Ok(Arc::new(config))
}
