use serde::{Deserialize, Serialize};

use crate::domain::wallpaper::WallpaperRecord;

/// One merged result page from the aggregator.
///
/// Order is randomized, never provider-grouped. A provider failing does not
/// empty or corrupt the contributions of its siblings, and `wallpapers` may
/// legitimately hold fewer records than requested when upstream pages run
/// short.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregatedPage {
    pub wallpapers: Vec<WallpaperRecord>,
    /// Names of providers that were attempted and errored on this call.
    /// Providers that were never attempted (disabled) do not appear here.
    pub failed_services: Vec<String>,
}

/// One render-ready entry of the interleaved feed.
///
/// Ad slots carry no payload, are never deduplicated, and never count toward
/// the wallpaper tally that drives ad cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedItem {
    Wallpaper(WallpaperRecord),
    AdSlot,
}

impl FeedItem {
    pub fn is_ad(&self) -> bool {
        matches!(self, FeedItem::AdSlot)
    }
}

/// Per-query pagination state, owned exclusively by one controller context.
///
/// Replaced wholesale whenever the query changes; `generation` is the
/// context-identity token that lets a late response for a superseded query
/// be recognized and discarded.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub query: String,
    pub generation: u64,
    /// Next upstream page to request, 1-based
    pub next_page: u32,
    /// No further results are expected for this query
    pub exhausted: bool,
    pub items: Vec<WallpaperRecord>,
    pub fetch_in_flight: bool,
}

impl FeedState {
    /// Fresh state for a query: cursor at 1, nothing accumulated, and the
    /// optimistic assumption that more data may exist.
    pub fn new(query: impl Into<String>, generation: u64) -> Self {
        Self {
            query: query.into(),
            generation,
            next_page: 1,
            exhausted: false,
            items: Vec::new(),
            fetch_in_flight: false,
        }
    }
}
