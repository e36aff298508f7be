// src/testing/mod.rs
//! Testing infrastructure: a scripted mock upstream for exercising the
//! engine without a network.

pub mod mock_upstream;

pub use mock_upstream::{CallCounters, MockTransport};
