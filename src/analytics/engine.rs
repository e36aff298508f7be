// src/analytics/engine.rs
//! The aggregation pipelines behind each consuming view.

use crate::{
    analytics::{
        join::{attach_comment_counts, join_posts_with_owners, EnrichedPost},
        ranking::{top_users_by_post_count, trending_posts, RankedUser, TrendingSummary},
    },
    api::EntityFetcher,
    error::FeedError,
};
use log::debug;
use std::sync::Arc;

/// Orchestrates fetch → join → rank for the three analytics views.
///
/// Owns the fetcher (and through it the cache); holds no view state of its
/// own, so concurrent cycles can share one engine instance freely.
pub struct AnalyticsEngine {
    fetcher: Arc<EntityFetcher>,
    top_users_count: usize,
}

impl AnalyticsEngine {
    pub fn new(fetcher: Arc<EntityFetcher>, top_users_count: usize) -> Self {
        Self {
            fetcher,
            top_users_count,
        }
    }

    pub fn fetcher(&self) -> &EntityFetcher {
        &self.fetcher
    }

    /// The live post feed: every post joined with its owner.
    ///
    /// Users are fetched first so the post fan-out reuses the warm cache
    /// entry instead of racing a second `/users` request.
    pub async fn feed(&self) -> Result<Vec<EnrichedPost>, FeedError> {
        let users = self.fetcher.fetch_users().await?;
        let posts = self.fetcher.fetch_all_posts().await?;

        let enriched = join_posts_with_owners(&posts, &users);
        debug!("Feed cycle produced {} posts", enriched.len());
        Ok(enriched)
    }

    /// The top-K users by post volume.
    pub async fn top_users(&self) -> Result<Vec<RankedUser>, FeedError> {
        let users = self.fetcher.fetch_users().await?;
        let posts = self.fetcher.fetch_all_posts().await?;

        Ok(top_users_by_post_count(&users, &posts, self.top_users_count))
    }

    /// The trending set: posts tied for the maximum comment count.
    /// Comment counts are only computed here, where the view needs them.
    pub async fn trending(&self) -> Result<TrendingSummary, FeedError> {
        let users = self.fetcher.fetch_users().await?;
        let posts = self.fetcher.fetch_all_posts().await?;

        let joined = join_posts_with_owners(&posts, &users);
        let enriched = attach_comment_counts(&self.fetcher, joined).await;
        Ok(trending_posts(&enriched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::{CacheConfig, ResponseCache},
        testing::MockTransport,
        utils::UserId,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn seeded_engine() -> AnalyticsEngine {
        let transport = MockTransport::new();
        transport
            .script_ok("users", json!({ "users": { "1": "Ada", "2": "Grace" } }))
            .await;
        transport
            .script_ok(
                "users/1/posts",
                json!({ "posts": [
                    { "id": 11, "userid": 1, "content": "from ada" },
                    { "id": 12, "userid": 1, "content": "more ada" }
                ] }),
            )
            .await;
        transport
            .script_ok(
                "users/2/posts",
                json!({ "posts": [{ "id": 21, "userid": 2, "content": "from grace" }] }),
            )
            .await;
        transport
            .script_ok("posts/11/comments", json!({ "comments": [{}, {}] }))
            .await;
        transport
            .script_ok("posts/12/comments", json!({ "comments": [] }))
            .await;
        transport
            .script_ok("posts/21/comments", json!({ "comments": [{}, {}] }))
            .await;

        let fetcher = EntityFetcher::new(
            Arc::new(transport),
            ResponseCache::new(CacheConfig::default()),
        );
        AnalyticsEngine::new(Arc::new(fetcher), 5)
    }

    #[tokio::test]
    async fn feed_joins_every_post_with_its_owner() {
        let engine = seeded_engine().await;
        let feed = engine.feed().await.unwrap();

        assert_eq!(feed.len(), 3);
        assert!(feed
            .iter()
            .all(|post| post.owner.is_some()));
    }

    #[tokio::test]
    async fn top_users_ranks_by_post_volume() {
        let engine = seeded_engine().await;
        let ranked = engine.top_users().await.unwrap();

        assert_eq!(ranked[0].user.id, UserId::new("1"));
        assert_eq!(ranked[0].post_count, 2);
        assert_eq!(ranked[1].post_count, 1);
    }

    #[tokio::test]
    async fn trending_returns_tied_posts_with_max_count() {
        let engine = seeded_engine().await;
        let summary = engine.trending().await.unwrap();

        assert_eq!(summary.max_comment_count, 2);
        let ids: Vec<&str> = summary.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["11", "21"]);
    }
}
