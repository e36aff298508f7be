// src/testing/mock_upstream.rs
//! Scripted upstream for tests.
//!
//! `MockTransport` plays back queued responses per request path and counts
//! every call, so tests can assert cache behavior ("no second upstream
//! call inside the TTL") and scheduler teardown ("no calls after
//! deactivation") without a network.

use crate::{api::transport::ApiTransport, error::FeedError};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::Mutex;

/// Shared per-path call counters, usable after the transport itself has
/// been moved into an `Arc<dyn ApiTransport>`.
#[derive(Clone, Default)]
pub struct CallCounters {
    counts: Arc<Mutex<HashMap<String, u64>>>,
}

impl CallCounters {
    pub async fn calls(&self, path: &str) -> u64 {
        self.counts.lock().await.get(path).copied().unwrap_or(0)
    }

    pub async fn total(&self) -> u64 {
        self.counts.lock().await.values().sum()
    }

    async fn record(&self, path: &str) {
        *self.counts.lock().await.entry(path.to_string()).or_insert(0) += 1;
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<Value, FeedError>>>>,
    counters: CallCounters,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON response for `path`. The last queued
    /// response for a path is sticky: once the queue is down to one entry
    /// it replays forever, which keeps steady-state polling tests simple.
    pub async fn script_ok(&self, path: &str, body: Value) {
        self.routes
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(body));
    }

    /// Queues a failing response for `path`; same sticky-last semantics.
    pub async fn script_err(&self, path: &str, err: FeedError) {
        self.routes
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .push_back(Err(err));
    }

    pub fn counters(&self) -> CallCounters {
        self.counters.clone()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get_json(&self, path: &str) -> Result<Value, FeedError> {
        self.counters.record(path).await;

        let mut routes = self.routes.lock().await;
        match routes.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| {
                Err(FeedError::Unknown(format!("empty script for {}", path)))
            }),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FeedError::Unknown(format!("empty script for {}", path)))),
            None => Err(FeedError::Unknown(format!("unscripted path: {}", path))),
        }
    }
}
