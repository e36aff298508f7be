// src/api/models.rs
//! Upstream payload envelopes.
//!
//! The upstream service is loose about shapes: arrays can be missing,
//! `content` can be absent, and ids flip between strings and numbers
//! depending on the collection. These structs absorb that at the
//! deserialization boundary so the rest of the engine sees canonical types.

use crate::utils::{Comment, Post, PostId, UserId};
use serde::Deserialize;
use std::collections::HashMap;

/// `GET /users` — `{ "users": { "<id>": "<display name>" } }`
#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub users: HashMap<String, String>,
}

/// `GET /users/{id}/posts` — `{ "posts": [...] }`, array may be absent.
#[derive(Debug, Deserialize)]
pub struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

/// A post as the upstream returns it. `userid` is the upstream spelling;
/// `userId` is accepted as well. Missing `content` coerces to empty.
#[derive(Debug, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: PostId,
    #[serde(default, alias = "userid", alias = "userId")]
    pub owner: UserId,
    #[serde(default)]
    pub content: String,
}

impl RawPost {
    pub fn into_post(self) -> Post {
        Post {
            id: self.id,
            owner_user_id: self.owner,
            content: self.content,
        }
    }
}

/// `GET /posts/{id}/comments` — `{ "comments": [...] }`, array may be absent.
#[derive(Debug, Deserialize)]
pub struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn users_envelope_parses_id_name_mapping() {
        let envelope: UsersEnvelope =
            serde_json::from_value(json!({ "users": { "1": "Ada", "2": "Grace" } })).unwrap();
        assert_eq!(envelope.users.len(), 2);
        assert_eq!(envelope.users["1"], "Ada");
    }

    #[test]
    fn posts_envelope_tolerates_missing_array() {
        let envelope: PostsEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.posts.is_empty());
    }

    #[test]
    fn raw_post_accepts_numeric_ids_and_userid_spelling() {
        let post: Post = serde_json::from_value::<RawPost>(json!({
            "id": 101,
            "userid": 3,
            "content": "hello"
        }))
        .unwrap()
        .into_post();
        assert_eq!(post.id, PostId::new("101"));
        assert_eq!(post.owner_user_id, UserId::new("3"));
        assert_eq!(post.content, "hello");
    }

    #[test]
    fn raw_post_defaults_missing_content() {
        let post = serde_json::from_value::<RawPost>(json!({ "id": 1, "userid": 2 }))
            .unwrap()
            .into_post();
        assert_eq!(post.content, "");
    }

    #[test]
    fn comments_envelope_tolerates_missing_array_and_bodies() {
        let empty: CommentsEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(empty.comments.is_empty());

        let sparse: CommentsEnvelope =
            serde_json::from_value(json!({ "comments": [{}, { "body": "nice" }] })).unwrap();
        assert_eq!(sparse.comments.len(), 2);
    }
}
