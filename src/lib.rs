pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod polling;
pub mod testing; // Testing infrastructure
pub mod utils;

// Re-export key engine components for easy access
pub use analytics::{AnalyticsEngine, EnrichedPost, RankedUser, TrendingSummary};
pub use api::{ApiTransport, EntityFetcher, HttpTransport};
pub use cache::{CacheConfig, ResponseCache};
pub use error::FeedError;
pub use polling::{FeedView, TopUsersView, TrendingView, ViewState};

// Re-export key testing components for easy access
pub use testing::MockTransport;
