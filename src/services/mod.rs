// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod aggregator_service;
pub mod feed_controller;
pub mod feed_sequencer;
pub mod refresh_service;

#[cfg(test)]
mod feed_controller_tests;

// Re-export all services and their types
pub use aggregator_service::{AggregatorService, WallpaperQuery, WallpaperSource};

pub use feed_controller::{
    FeedController,
    LoadOutcome,
    DEFAULT_PER_PAGE,
    PREFETCH_THRESHOLD,
};

pub use feed_sequencer::{interleave, DEFAULT_AD_CADENCE};

pub use refresh_service::{
    RefreshService,
    RefreshTrigger,
    ReshuffleOutcome,
    RETAIN_RATIO,
};
