// src/main.rs
use social_pulse::{
    analytics::AnalyticsEngine,
    api::{EntityFetcher, HttpTransport},
    cache::{CacheConfig, ResponseCache},
    config,
    error::FeedError,
    polling::{FeedView, TopUsersView, TrendingView},
    utils::setup_logging,
};

use log::info;
use std::{sync::Arc, time::Duration};

#[tokio::main]
async fn main() -> Result<(), FeedError> {
    setup_logging().expect("Failed to initialize logging");
    info!("Social Pulse analytics engine starting...");

    // --- Configuration & Initialization ---
    let app_config = config::load_config()?;

    let transport = Arc::new(HttpTransport::new(&app_config)?);
    let fetcher = Arc::new(EntityFetcher::new(
        transport,
        ResponseCache::new(CacheConfig::with_ttl_ms(app_config.cache_ttl_ms)),
    ));
    let engine = Arc::new(AnalyticsEngine::new(
        fetcher.clone(),
        app_config.top_users_count,
    ));

    // --- Activate the three polling views ---
    let feed_period = Duration::from_millis(app_config.feed_poll_interval_ms);
    let ranking_period = Duration::from_millis(app_config.ranking_poll_interval_ms);

    let feed = FeedView::activate_feed(engine.clone(), feed_period);
    let top_users = TopUsersView::activate_top_users(engine.clone(), ranking_period);
    let trending = TrendingView::activate_trending(engine.clone(), ranking_period);

    info!(
        "Views active: feed every {}ms, rankings every {}ms",
        app_config.feed_poll_interval_ms, app_config.ranking_poll_interval_ms
    );

    // --- Periodic snapshot logging until Ctrl-C ---
    let snapshot_period = Duration::from_millis(app_config.feed_poll_interval_ms.max(1000));
    let report = async {
        let mut ticker = tokio::time::interval(snapshot_period);
        loop {
            ticker.tick().await;

            let feed_state = feed.snapshot().await;
            let top_state = top_users.snapshot().await;
            let trending_state = trending.snapshot().await;

            if let Some(err) = feed_state.error.as_deref() {
                info!("Feed unavailable: {}", err);
            } else if !feed_state.is_loading {
                info!("Feed: {} posts", feed_state.data.len());
            }
            for ranked in &top_state.data {
                info!(
                    "  #{} {} ({} posts)",
                    ranked.user.id, ranked.user.name, ranked.post_count
                );
            }
            if trending_state.data.max_comment_count > 0 {
                info!(
                    "Trending: {} post(s) at {} comments",
                    trending_state.data.posts.len(),
                    trending_state.data.max_comment_count
                );
            }

            let metrics = fetcher.cache().metrics();
            info!(
                "Cache: {} hits / {} misses ({:.1}% hit rate)",
                metrics.hits(),
                metrics.misses(),
                metrics.hit_rate() * 100.0
            );
        }
    };

    tokio::select! {
        _ = report => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down gracefully...");
        }
    }

    // Deactivate every view; no scheduled work survives this.
    feed.deactivate().await;
    top_users.deactivate().await;
    trending.deactivate().await;
    info!("All views deactivated. Bye.");

    Ok(())
}
