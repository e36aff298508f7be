// src/analytics/join.rs
//! Merges posts with their owning user records and enriches posts with
//! comment counts.

use crate::{
    api::EntityFetcher,
    utils::{Post, PostId, User, UserId},
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;

/// Number of characters of post content used for the derived title.
const TITLE_MAX_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";

/// A post joined with its owner and derived presentation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPost {
    pub id: PostId,
    pub owner_user_id: UserId,
    /// `None` when the post references a user the upstream never returned.
    pub owner: Option<User>,
    pub title: String,
    pub body: String,
    pub comment_count: usize,
}

/// Derives the display title: the first 30 characters of the content,
/// with an ellipsis appended when truncation occurred. Counts `char`s so
/// multibyte content cannot be split mid code point.
fn derive_title(content: &str) -> String {
    if content.chars().count() <= TITLE_MAX_CHARS {
        content.to_string()
    } else {
        let prefix: String = content.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}{}", prefix, TITLE_ELLIPSIS)
    }
}

/// Joins every post with its owning user record.
///
/// Produces exactly one output per input post; `owner` is `None` iff no
/// user with a matching id exists. Ids were canonicalized to strings at
/// ingestion, so the lookup is a plain string-keyed map.
pub fn join_posts_with_owners(posts: &[Post], users: &[User]) -> Vec<EnrichedPost> {
    let by_id: HashMap<&UserId, &User> = users.iter().map(|user| (&user.id, user)).collect();

    posts
        .iter()
        .map(|post| EnrichedPost {
            id: post.id.clone(),
            owner_user_id: post.owner_user_id.clone(),
            owner: by_id.get(&post.owner_user_id).map(|user| (*user).clone()),
            title: derive_title(&post.content),
            body: post.content.clone(),
            comment_count: 0,
        })
        .collect()
}

/// Attaches comment counts to already-joined posts.
///
/// All per-post comment fetches are issued concurrently and joined only
/// after every member of the batch has settled; one post's (soft) comment
/// failure resolves to a count of 0 without blocking or failing siblings.
pub async fn attach_comment_counts(
    fetcher: &EntityFetcher,
    posts: Vec<EnrichedPost>,
) -> Vec<EnrichedPost> {
    let counts = join_all(
        posts
            .iter()
            .map(|post| fetcher.fetch_comments(&post.id)),
    )
    .await;

    posts
        .into_iter()
        .zip(counts)
        .map(|(mut post, comments)| {
            post.comment_count = comments.len();
            post
        })
        .collect()
}
