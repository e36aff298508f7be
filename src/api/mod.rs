// src/api/mod.rs

pub mod fetcher;
pub mod models;
pub mod transport;

// Re-export the pieces callers actually wire together.
pub use fetcher::EntityFetcher;
pub use transport::{ApiTransport, HttpTransport};
