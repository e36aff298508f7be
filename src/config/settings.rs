use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub relay_url: Option<String>,
    pub http_timeout_ms: u64,
    pub cache_ttl_ms: u64,
    pub feed_poll_interval_ms: u64,
    pub ranking_poll_interval_ms: u64,
    pub top_users_count: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://20.244.56.144/evaluation-service".to_string()),
            relay_url: env::var("RELAY_URL").ok().filter(|s| !s.is_empty()),
            http_timeout_ms: env::var("HTTP_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
            cache_ttl_ms: env::var("CACHE_TTL_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            feed_poll_interval_ms: env::var("FEED_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
            ranking_poll_interval_ms: env::var("RANKING_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30000),
            top_users_count: env::var("TOP_USERS_COUNT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }

    pub fn validate_and_log(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if self.api_base_url.is_empty() {
            log::error!("API_BASE_URL cannot be empty.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_contract() {
        let config = Config::from_env();
        assert_eq!(config.cache_ttl_ms, 5000);
        assert_eq!(config.feed_poll_interval_ms, 10000);
        assert_eq!(config.ranking_poll_interval_ms, 30000);
        assert_eq!(config.top_users_count, 5);
    }
}
