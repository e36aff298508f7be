// src/analytics/ranking.rs
//! Derived rankings: top users by post volume and the trending-post set.

use crate::{
    analytics::join::EnrichedPost,
    utils::{Post, User},
};
use itertools::Itertools;
use serde::Serialize;

/// A user annotated with their post count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedUser {
    pub user: User,
    pub post_count: usize,
}

/// The set of posts tied for the maximum comment count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendingSummary {
    pub posts: Vec<EnrichedPost>,
    pub max_comment_count: usize,
}

/// Ranks users descending by post count and truncates to the top `k`.
///
/// Users with no posts count as 0 and still appear when fewer than `k`
/// users exist. The sort is stable over the ingestion order (ascending
/// user id), so equal counts resolve in ascending-id order.
pub fn top_users_by_post_count(users: &[User], posts: &[Post], k: usize) -> Vec<RankedUser> {
    let counts = posts
        .iter()
        .map(|post| &post.owner_user_id)
        .counts();

    let mut ranked: Vec<RankedUser> = users
        .iter()
        .map(|user| RankedUser {
            user: user.clone(),
            post_count: counts.get(&user.id).copied().unwrap_or(0),
        })
        .collect();

    ranked.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    ranked.truncate(k);
    ranked
}

/// Computes the trending set: every post tied at the maximum comment
/// count, but only when that maximum is positive — zero comments does not
/// count as trending.
pub fn trending_posts(enriched: &[EnrichedPost]) -> TrendingSummary {
    let max_comment_count = enriched
        .iter()
        .map(|post| post.comment_count)
        .max()
        .unwrap_or(0);

    if max_comment_count == 0 {
        return TrendingSummary::default();
    }

    TrendingSummary {
        posts: enriched
            .iter()
            .filter(|post| post.comment_count == max_comment_count)
            .cloned()
            .collect(),
        max_comment_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{PostId, UserId};
    use pretty_assertions::assert_eq;

    fn user(id: &str, name: &str) -> User {
        User::new(UserId::new(id), name)
    }

    fn post(id: &str, owner: &str) -> Post {
        Post {
            id: PostId::new(id),
            owner_user_id: UserId::new(owner),
            content: String::new(),
        }
    }

    fn enriched(id: &str, comment_count: usize) -> EnrichedPost {
        EnrichedPost {
            id: PostId::new(id),
            owner_user_id: UserId::new("1"),
            owner: None,
            title: String::new(),
            body: String::new(),
            comment_count,
        }
    }

    #[test]
    fn ranks_descending_and_truncates_to_k() {
        let users = vec![user("1", "a"), user("2", "b"), user("3", "c")];
        let posts = vec![
            post("10", "2"),
            post("11", "2"),
            post("12", "3"),
            post("13", "2"),
            post("14", "3"),
            post("15", "1"),
        ];

        let ranked = top_users_by_post_count(&users, &posts, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user.id, UserId::new("2"));
        assert_eq!(ranked[0].post_count, 3);
        assert_eq!(ranked[1].user.id, UserId::new("3"));
        assert_eq!(ranked[1].post_count, 2);
    }

    #[test]
    fn zero_post_users_appear_when_fewer_than_k() {
        let users = vec![user("1", "a"), user("2", "b")];
        let posts = vec![post("10", "1")];

        let ranked = top_users_by_post_count(&users, &posts, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].user.id, UserId::new("2"));
        assert_eq!(ranked[1].post_count, 0);
    }

    #[test]
    fn ties_resolve_in_ascending_id_order() {
        let users = vec![user("1", "a"), user("2", "b"), user("3", "c")];
        let posts = vec![post("10", "3"), post("11", "1")];

        let ranked = top_users_by_post_count(&users, &posts, 3);
        // 1 and 3 tie at one post each; stable sort keeps ingestion order.
        assert_eq!(ranked[0].user.id, UserId::new("1"));
        assert_eq!(ranked[1].user.id, UserId::new("3"));
        assert_eq!(ranked[2].post_count, 0);
    }

    #[test]
    fn never_returns_more_than_k() {
        let users: Vec<User> = (0..10).map(|i| user(&i.to_string(), "u")).collect();
        let ranked = top_users_by_post_count(&users, &[], 5);
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn all_zero_comment_counts_yield_empty_trending_set() {
        let posts = vec![enriched("1", 0), enriched("2", 0), enriched("3", 0)];
        let summary = trending_posts(&posts);
        assert!(summary.posts.is_empty());
        assert_eq!(summary.max_comment_count, 0);
    }

    #[test]
    fn trending_returns_every_post_tied_at_the_max() {
        let posts = vec![
            enriched("1", 2),
            enriched("2", 5),
            enriched("3", 5),
            enriched("4", 1),
        ];
        let summary = trending_posts(&posts);
        assert_eq!(summary.max_comment_count, 5);
        let ids: Vec<&str> = summary.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = trending_posts(&[]);
        assert!(summary.posts.is_empty());
        assert_eq!(summary.max_comment_count, 0);
    }
}
