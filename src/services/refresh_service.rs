// src/services/refresh_service.rs
//
// Reshuffle / session-refresh policy.
//
// Two tiers of refresh. An explicit user reshuffle discards most of the
// visible set and replenishes it from the aggregator at the next unused
// cursor. The passive triggers (returning to the root view, the surface
// regaining foreground) only re-randomize the presentation order of what is
// already in memory: no network, and which assets are known never changes.

use std::sync::{Arc, Mutex};

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::events::{EventBus, FeedReshuffled};
use crate::services::aggregator_service::{WallpaperQuery, WallpaperSource};
use crate::services::feed_controller::{merge_unique, FeedController, LoadOutcome};

/// Fraction of the currently displayed wallpapers an explicit reshuffle
/// keeps; the rest is discarded and replenished.
pub const RETAIN_RATIO: f32 = 0.4;

/// Passive refresh triggers; the explicit user action has its own entry
/// point because it is the only one allowed to touch the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    ReturnToRoot,
    Foregrounded,
}

/// What an explicit reshuffle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshuffleOutcome {
    pub kept: usize,
    pub added: usize,
    /// The consumer should reset scroll position when this is set
    pub scroll_to_top: bool,
}

pub struct RefreshService {
    controller: Arc<FeedController>,
    source: Arc<dyn WallpaperSource>,
    event_bus: Arc<EventBus>,
    rng: Mutex<StdRng>,
    retain_ratio: f32,
}

impl RefreshService {
    pub fn new(
        controller: Arc<FeedController>,
        source: Arc<dyn WallpaperSource>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self::with_rng(controller, source, event_bus, StdRng::from_entropy())
    }

    /// Deterministic shuffle order for tests.
    pub fn with_seed(
        controller: Arc<FeedController>,
        source: Arc<dyn WallpaperSource>,
        event_bus: Arc<EventBus>,
        seed: u64,
    ) -> Self {
        Self::with_rng(controller, source, event_bus, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        controller: Arc<FeedController>,
        source: Arc<dyn WallpaperSource>,
        event_bus: Arc<EventBus>,
        rng: StdRng,
    ) -> Self {
        Self {
            controller,
            source,
            event_bus,
            rng: Mutex::new(rng),
            retain_ratio: RETAIN_RATIO,
        }
    }

    /// Explicit user-initiated reshuffle.
    ///
    /// Keeps `RETAIN_RATIO` of the current list (its order is already
    /// random after the previous shuffle, so the kept prefix is a fair
    /// sample), fetches a batch sized to the discarded remainder, merges
    /// and reshuffles the combined set, and asks the consumer to scroll
    /// back to the top. On an exhausted query there is nothing left to
    /// replenish with, so the whole list is kept and only its order changes.
    pub async fn reshuffle(&self) -> ReshuffleOutcome {
        let current = self.controller.items();

        if current.is_empty() {
            // Nothing on screen to retain; a plain incremental load is the
            // whole refresh.
            let outcome = self.controller.load_more(false).await;
            let added = match outcome {
                LoadOutcome::Loaded { appended, .. } => appended,
                _ => 0,
            };
            return ReshuffleOutcome {
                kept: 0,
                added,
                scroll_to_top: added > 0,
            };
        }

        if self.controller.is_exhausted() {
            let mut rng = self.rng.lock().unwrap();
            self.controller.shuffle_in_place(&mut *rng);
            return ReshuffleOutcome {
                kept: current.len(),
                added: 0,
                scroll_to_top: true,
            };
        }

        let (query, generation, page) = match self.controller.begin_reshuffle() {
            Some(reserved) => reserved,
            None => {
                debug!("reshuffle skipped; a fetch is already in flight");
                return ReshuffleOutcome {
                    kept: current.len(),
                    added: 0,
                    scroll_to_top: false,
                };
            }
        };

        let keep_count = (current.len() as f32 * self.retain_ratio).round() as usize;
        let replenish = current.len() - keep_count;

        let fetched = self
            .source
            .get_wallpapers(WallpaperQuery {
                query: query.clone(),
                page,
                per_page: replenish.max(1),
            })
            .await;

        // An empty batch means the cursor ran off the end of the query's
        // results; discarding the remainder would shrink the feed for
        // nothing, so keep everything and just re-randomize.
        let replenished = !fetched.wallpapers.is_empty();
        let mut combined: Vec<_> = if replenished {
            current.into_iter().take(keep_count).collect()
        } else {
            current
        };
        let kept = combined.len();
        let added = merge_unique(&mut combined, fetched.wallpapers);

        {
            let mut rng = self.rng.lock().unwrap();
            combined.shuffle(&mut *rng);
        }

        let applied = self.controller.finish_reshuffle(generation, combined, replenished);
        if applied {
            self.event_bus
                .emit(FeedReshuffled::new(query, kept, added));
        }

        ReshuffleOutcome {
            kept,
            added,
            scroll_to_top: applied,
        }
    }

    /// Passive refresh: cheap in-place re-randomization of presentation
    /// order only.
    pub fn refresh_presentation(&self, trigger: RefreshTrigger) {
        debug!("presentation-only reshuffle on {:?}", trigger);
        let mut rng = self.rng.lock().unwrap();
        self.controller.shuffle_in_place(&mut *rng);
    }
}
