// src/api/transport.rs
//! The transport seam between the engine and the upstream HTTP service.
//!
//! The engine only depends on an abstract "issue GET, parse JSON"
//! capability; the concrete transport knows about reqwest and the optional
//! forwarding relay used to route around browser-origin restrictions.

use crate::{config::Config, error::FeedError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::form_urlencoded;

/// Abstract GET/JSON capability the engine is written against.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issues a GET for `path` (relative to the upstream base) and parses
    /// the response body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, FeedError>;
}

/// Production transport: reqwest with a request timeout, optionally
/// wrapping every request in a forwarding relay.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    relay_url: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .build()
            .map_err(|e| FeedError::ConfigError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            relay_url: config.relay_url.clone(),
        })
    }

    /// Resolves the request URL for `path`. With a relay configured the
    /// absolute upstream URL is percent-encoded and appended to the relay
    /// prefix, mirroring `{relay}?{encoded_target}` style forwarders.
    fn request_url(&self, path: &str) -> String {
        let target = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        match &self.relay_url {
            Some(relay) => {
                let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
                format!("{}{}", relay, encoded)
            }
            None => target,
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, FeedError> {
        let url = self.request_url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus(format!("{} from {}", status, url)));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with(base: &str, relay: Option<&str>) -> Config {
        Config {
            api_base_url: base.to_string(),
            relay_url: relay.map(String::from),
            http_timeout_ms: 1000,
            cache_ttl_ms: 5000,
            feed_poll_interval_ms: 10000,
            ranking_poll_interval_ms: 30000,
            top_users_count: 5,
        }
    }

    #[test]
    fn direct_url_joins_base_and_path() {
        let transport = HttpTransport::new(&config_with("http://api.example/svc/", None)).unwrap();
        assert_eq!(
            transport.request_url("/users"),
            "http://api.example/svc/users"
        );
    }

    #[test]
    fn relay_url_percent_encodes_the_target() {
        let transport = HttpTransport::new(&config_with(
            "http://api.example/svc",
            Some("https://relay.example/?"),
        ))
        .unwrap();
        assert_eq!(
            transport.request_url("users/3/posts"),
            "https://relay.example/?http%3A%2F%2Fapi.example%2Fsvc%2Fusers%2F3%2Fposts"
        );
    }
}
