// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod feed;
pub mod wallpaper;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Wallpaper Domain
pub use wallpaper::{validate_wallpaper, WallpaperId, WallpaperRecord};

// Feed Domain
pub use feed::{AggregatedPage, FeedItem, FeedState};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
