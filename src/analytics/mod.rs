// src/analytics/mod.rs

pub mod engine;
pub mod join;
pub mod ranking;

pub use engine::AnalyticsEngine;
pub use join::{attach_comment_counts, join_posts_with_owners, EnrichedPost};
pub use ranking::{top_users_by_post_count, trending_posts, RankedUser, TrendingSummary};
