// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// AGGREGATION EVENTS
// ============================================================================

/// Emitted when one aggregation call completes, successfully or not.
/// Carries the lossless failure report for diagnostics/telemetry consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAggregated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub page: u32,
    pub returned: usize,
    pub failed_services: Vec<String>,
}

impl PageAggregated {
    pub fn new(query: String, page: u32, returned: usize, failed_services: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            page,
            returned,
            failed_services,
        }
    }
}

impl DomainEvent for PageAggregated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "PageAggregated"
    }
}

/// Emitted for each attempted provider that errored during a fan-out.
/// Disabled providers are never attempted, so they never produce this event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub provider: String,
    pub query: String,
    pub page: u32,
    pub reason: String,
}

impl ProviderFailed {
    pub fn new(provider: String, query: String, page: u32, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            provider,
            query,
            page,
            reason,
        }
    }
}

impl DomainEvent for ProviderFailed {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ProviderFailed"
    }
}

// ============================================================================
// FEED EVENTS
// ============================================================================

/// Emitted when the active query of a feed context changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub previous: String,
    pub current: String,
}

impl QueryChanged {
    pub fn new(previous: String, current: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            previous,
            current,
        }
    }
}

impl DomainEvent for QueryChanged {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "QueryChanged"
    }
}

/// Emitted after an explicit user reshuffle replaced part of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedReshuffled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
    pub kept: usize,
    pub added: usize,
}

impl FeedReshuffled {
    pub fn new(query: String, kept: usize, added: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
            kept,
            added,
        }
    }
}

impl DomainEvent for FeedReshuffled {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "FeedReshuffled"
    }
}
