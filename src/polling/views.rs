// src/polling/views.rs
//! The three consuming views and their shared state contract.

use crate::{
    analytics::{AnalyticsEngine, EnrichedPost, RankedUser, TrendingSummary},
    error::FeedError,
    polling::scheduler::PollHandle,
};
use chrono::{DateTime, Utc};
use log::warn;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::sync::RwLock;

/// Snapshot contract handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            is_loading: true,
            error: None,
            last_updated: None,
        }
    }
}

/// Applies one cycle's outcome to the shared state. Last writer wins; a
/// failing cycle records the error but keeps previously successful data.
async fn apply_cycle<T>(state: &RwLock<ViewState<T>>, view: &str, result: Result<T, FeedError>) {
    let mut guard = state.write().await;
    guard.is_loading = false;
    match result {
        Ok(data) => {
            guard.data = data;
            guard.error = None;
            guard.last_updated = Some(Utc::now());
        }
        Err(e) => {
            warn!("{} cycle failed ({:?}): {}", view, e.categorize(), e);
            guard.error = Some(e.to_string());
        }
    }
}

/// A view kept current by a poll loop: shared snapshot state plus the
/// handle driving it. No error escapes the loop — every cycle outcome is
/// folded into the state.
pub struct PolledView<T> {
    state: Arc<RwLock<ViewState<T>>>,
    poll: PollHandle,
}

impl<T: Clone + Default + Send + Sync + 'static> PolledView<T> {
    fn activate_with<F, Fut>(name: &'static str, period: Duration, mut produce: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FeedError>> + Send + 'static,
    {
        let state = Arc::new(RwLock::new(ViewState::default()));
        let cycle_state = state.clone();

        let poll = PollHandle::spawn(name, period, move || {
            let state = cycle_state.clone();
            let fut = produce();
            async move {
                let result = fut.await;
                apply_cycle(&state, name, result).await;
            }
        });

        Self { state, poll }
    }

    /// Current snapshot for the presentation layer.
    pub async fn snapshot(&self) -> ViewState<T> {
        self.state.read().await.clone()
    }

    /// Forces an immediate cycle independent of the timer.
    pub async fn refresh(&self) {
        self.poll.refresh().await;
    }

    /// Stops polling; no further fetches occur once this returns.
    pub async fn deactivate(self) {
        self.poll.shutdown().await;
    }
}

pub type FeedView = PolledView<Vec<EnrichedPost>>;
pub type TopUsersView = PolledView<Vec<RankedUser>>;
pub type TrendingView = PolledView<TrendingSummary>;

impl PolledView<Vec<EnrichedPost>> {
    pub fn activate_feed(engine: Arc<AnalyticsEngine>, period: Duration) -> Self {
        Self::activate_with("feed", period, move || {
            let engine = engine.clone();
            async move { engine.feed().await }
        })
    }
}

impl PolledView<Vec<RankedUser>> {
    pub fn activate_top_users(engine: Arc<AnalyticsEngine>, period: Duration) -> Self {
        Self::activate_with("top-users", period, move || {
            let engine = engine.clone();
            async move { engine.top_users().await }
        })
    }
}

impl PolledView<TrendingSummary> {
    pub fn activate_trending(engine: Arc<AnalyticsEngine>, period: Duration) -> Self {
        Self::activate_with("trending", period, move || {
            let engine = engine.clone();
            async move { engine.trending().await }
        })
    }
}
