// src/domain/feed/mod.rs

pub mod entity;

pub use entity::{AggregatedPage, FeedItem, FeedState};
