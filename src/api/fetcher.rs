// src/api/fetcher.rs
//! Raw entity retrieval with TTL memoization and per-item fault tolerance.
//!
//! Failure policy: `fetch_users` and `fetch_all_posts` fail loud — they are
//! foundational and the caller decides what to show. Per-user post fetches
//! and comment fetches fail soft to empty collections, because partial data
//! is acceptable for those.

use crate::{
    api::models::{CommentsEnvelope, PostsEnvelope, UsersEnvelope},
    api::transport::ApiTransport,
    cache::ResponseCache,
    error::FeedError,
    utils::{Comment, Post, PostId, User, UserId},
};
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;

pub struct EntityFetcher {
    transport: Arc<dyn ApiTransport>,
    cache: ResponseCache,
}

impl EntityFetcher {
    pub fn new(transport: Arc<dyn ApiTransport>, cache: ResponseCache) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Retrieves the full user collection, served from cache while fresh.
    ///
    /// The upstream payload is a mapping from id to display name; it is
    /// normalized into `User` records sorted ascending by id, which is the
    /// deterministic ordering every downstream consumer relies on.
    pub async fn fetch_users(&self) -> Result<Vec<User>, FeedError> {
        if let Some(users) = self.cache.fresh_users().await {
            return Ok(users);
        }

        let body = self.transport.get_json("users").await?;
        let envelope: UsersEnvelope = serde_json::from_value(body)?;

        let mut users: Vec<User> = envelope
            .users
            .into_iter()
            .map(|(id, name)| User::new(UserId::new(&id), name))
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));

        debug!("Fetched {} users from upstream", users.len());
        self.cache.store_users(users.clone()).await;
        Ok(users)
    }

    /// Retrieves the posts owned by one user. Fail soft: any error yields
    /// an empty list for that user rather than failing the whole batch.
    pub async fn fetch_posts_for_user(&self, user_id: &UserId) -> Vec<Post> {
        let path = format!("users/{}/posts", user_id);
        match self.transport.get_json(&path).await {
            Ok(body) => match serde_json::from_value::<PostsEnvelope>(body) {
                Ok(envelope) => envelope
                    .posts
                    .into_iter()
                    .map(|raw| raw.into_post())
                    .collect(),
                Err(e) => {
                    warn!("Malformed posts payload for user {}: {}", user_id, e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Failed to fetch posts for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Retrieves the full post collection, served from cache while fresh.
    ///
    /// Fans out one per-user fetch for every known user concurrently and
    /// waits for the entire batch; individual user failures degrade to
    /// empty results without aborting their siblings.
    pub async fn fetch_all_posts(&self) -> Result<Vec<Post>, FeedError> {
        if let Some(posts) = self.cache.fresh_posts().await {
            return Ok(posts);
        }

        let users = self.fetch_users().await?;
        let batches = join_all(
            users
                .iter()
                .map(|user| self.fetch_posts_for_user(&user.id)),
        )
        .await;

        let posts: Vec<Post> = batches.into_iter().flatten().collect();
        debug!(
            "Fetched {} posts across {} users",
            posts.len(),
            users.len()
        );
        self.cache.store_posts(posts.clone()).await;
        Ok(posts)
    }

    /// Retrieves the comments for one post. Best-effort: transport errors,
    /// non-success statuses, and malformed payloads all yield an empty
    /// list — this call never raises to its caller. Never cached.
    pub async fn fetch_comments(&self, post_id: &PostId) -> Vec<Comment> {
        let path = format!("posts/{}/comments", post_id);
        match self.transport.get_json(&path).await {
            Ok(body) => match serde_json::from_value::<CommentsEnvelope>(body) {
                Ok(envelope) => envelope.comments,
                Err(e) => {
                    warn!("Malformed comments payload for post {}: {}", post_id, e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("No comments available for post {}: {}", post_id, e);
                Vec::new()
            }
        }
    }
}
