// src/lib.rs
// Snapwall - Multi-source wallpaper aggregation engine
//
// Architecture:
// - Domain-centric: normalized records and feed state live in domain/
// - Provider adapters: one per upstream photo source, behind one contract
// - Services: aggregation fan-out, pagination, ad interleaving, reshuffle
// - Event-driven diagnostics: failures surface on a synchronous event bus
// - No persistence, no UI: this crate is the engine under the grid/feed

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;

// ============================================================================
// PROVIDERS & SERVICES
// ============================================================================

pub mod providers;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_wallpaper,
    AggregatedPage,
    FeedItem,
    FeedState,
    WallpaperId,
    WallpaperRecord,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FeedReshuffled,
    PageAggregated,
    ProviderFailed,
    QueryChanged,
};

// ============================================================================
// PUBLIC API - Configuration & Providers
// ============================================================================

pub use config::ProviderSettings;
pub use providers::{enabled_providers, ImageProvider};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    interleave,
    AggregatorService,
    FeedController,
    LoadOutcome,
    RefreshService,
    RefreshTrigger,
    ReshuffleOutcome,
    WallpaperQuery,
    WallpaperSource,
    DEFAULT_AD_CADENCE,
    DEFAULT_PER_PAGE,
    PREFETCH_THRESHOLD,
    RETAIN_RATIO,
};
