// src/services/feed_controller.rs
//
// Pagination / incremental-load controller.
//
// Owns exactly one query context at a time. The context's state is a value
// object replaced wholesale on every mutation-worthy transition; the
// `generation` counter identifies the context so a response that arrives
// after the query changed is recognized as stale and discarded instead of
// clobbering the newer query's results.
//
// Concurrency model: single logical owner, cooperative scheduling. The
// `fetch_in_flight` flag (not a lock held across awaits) serializes loads,
// so a proximity trigger firing several times cannot start duplicate
// fetches.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{FeedItem, FeedState, WallpaperId, WallpaperRecord};
use crate::events::{EventBus, QueryChanged};
use crate::services::aggregator_service::{WallpaperQuery, WallpaperSource};
use crate::services::feed_sequencer::{interleave, DEFAULT_AD_CADENCE};

/// Merged page size requested per incremental load
pub const DEFAULT_PER_PAGE: usize = 12;

/// How close to the end of the materialized list the consumer may get
/// before the next load is requested; hides fetch latency behind the
/// remaining scroll distance.
pub const PREFETCH_THRESHOLD: usize = 2;

/// What a `load_more` call amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New records merged in (possibly zero after dedup)
    Loaded {
        appended: usize,
        failed_services: Vec<String>,
    },
    /// A fetch was already in flight for this context; call was a no-op
    InFlight,
    /// The context has no further results
    Exhausted,
    /// The response belonged to a superseded query and was discarded
    Stale,
}

pub struct FeedController {
    source: Arc<dyn WallpaperSource>,
    event_bus: Arc<EventBus>,
    state: Mutex<FeedState>,
    per_page: usize,
    ad_cadence: usize,
}

impl FeedController {
    pub fn new(
        source: Arc<dyn WallpaperSource>,
        event_bus: Arc<EventBus>,
        initial_query: &str,
    ) -> Self {
        Self {
            source,
            event_bus,
            state: Mutex::new(FeedState::new(initial_query, 0)),
            per_page: DEFAULT_PER_PAGE,
            ad_cadence: DEFAULT_AD_CADENCE,
        }
    }

    /// Override paging constants, mainly for tests and embedding surfaces
    /// with different grid densities.
    pub fn with_paging(mut self, per_page: usize, ad_cadence: usize) -> Self {
        self.per_page = per_page;
        self.ad_cadence = ad_cadence;
        self
    }

    /// Fetch and merge the next page for the current context.
    ///
    /// No-op when a fetch is already in flight, or when the context is
    /// exhausted and this is not a fresh-query load. A fresh-query load
    /// always starts at page 1 and resets exhaustion, because a new query
    /// starts out believing more data may exist.
    pub async fn load_more(&self, is_new_query: bool) -> LoadOutcome {
        let (query, generation, page) = {
            let mut state = self.state.lock().unwrap();
            if state.fetch_in_flight {
                return LoadOutcome::InFlight;
            }
            if state.exhausted && !is_new_query {
                return LoadOutcome::Exhausted;
            }
            state.fetch_in_flight = true;
            let page = if is_new_query { 1 } else { state.next_page };
            (state.query.clone(), state.generation, page)
        };

        let fetched = self
            .source
            .get_wallpapers(WallpaperQuery {
                query: query.clone(),
                page,
                per_page: self.per_page,
            })
            .await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            // The context this response was fetched for no longer exists;
            // the replacement state carries its own in-flight flag.
            debug!("discarding stale page {} for superseded query '{}'", page, query);
            return LoadOutcome::Stale;
        }
        state.fetch_in_flight = false;

        if fetched.wallpapers.is_empty() && !is_new_query {
            state.exhausted = true;
            return LoadOutcome::Exhausted;
        }

        let appended = merge_unique(&mut state.items, fetched.wallpapers);
        state.next_page = page + 1;
        if is_new_query {
            state.exhausted = false;
        }

        LoadOutcome::Loaded {
            appended,
            failed_services: fetched.failed_services,
        }
    }

    /// Switch the context to a new query. Returns false when the query is
    /// unchanged. Any in-flight fetch for the old query keeps running but
    /// its response will fail the generation check and be discarded.
    pub fn on_query_change(&self, query: &str) -> bool {
        let previous = {
            let mut state = self.state.lock().unwrap();
            if state.query == query {
                return false;
            }
            let previous = state.query.clone();
            let generation = state.generation + 1;
            *state = FeedState::new(query, generation);
            previous
        };
        self.event_bus
            .emit(QueryChanged::new(previous, query.to_string()));
        true
    }

    /// Proximity trigger: true when the consumer is near the end of the
    /// materialized list and another load would currently do something.
    pub fn should_load_more(&self, visible_index: usize) -> bool {
        let state = self.state.lock().unwrap();
        !state.exhausted
            && !state.fetch_in_flight
            && visible_index + PREFETCH_THRESHOLD >= state.items.len()
    }

    /// The accumulated wallpaper list, in presentation order.
    pub fn items(&self) -> Vec<WallpaperRecord> {
        self.state.lock().unwrap().items.clone()
    }

    /// The render-ready interleaved sequence, re-derived on every call so
    /// ad positions always match the current wallpaper list.
    pub fn feed(&self) -> Vec<FeedItem> {
        let state = self.state.lock().unwrap();
        interleave(&state.items, self.ad_cadence)
    }

    pub fn current_query(&self) -> String {
        self.state.lock().unwrap().query.clone()
    }

    pub fn next_page(&self) -> u32 {
        self.state.lock().unwrap().next_page
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.lock().unwrap().exhausted
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().fetch_in_flight
    }

    /// Reserve the context for a reshuffle fetch: same in-flight guard as
    /// `load_more`, returning the cursor to replenish from.
    pub(crate) fn begin_reshuffle(&self) -> Option<(String, u64, u32)> {
        let mut state = self.state.lock().unwrap();
        if state.fetch_in_flight {
            return None;
        }
        state.fetch_in_flight = true;
        Some((state.query.clone(), state.generation, state.next_page))
    }

    /// Install the reshuffled item list, provided the context has not been
    /// superseded in the meantime. The reserved cursor is consumed only when
    /// the replenish fetch produced something; an empty batch means the
    /// query has no further pages, so the cursor stays put and the feed is
    /// marked exhausted instead.
    pub(crate) fn finish_reshuffle(
        &self,
        generation: u64,
        items: Vec<WallpaperRecord>,
        replenished: bool,
    ) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            return false;
        }
        state.fetch_in_flight = false;
        state.items = items;
        if replenished {
            state.next_page += 1;
        } else {
            state.exhausted = true;
        }
        true
    }

    /// Re-randomize presentation order in place. No network, no identity
    /// changes; which assets are known stays exactly the same.
    pub fn shuffle_in_place<R: Rng>(&self, rng: &mut R) {
        let mut state = self.state.lock().unwrap();
        state.items.shuffle(rng);
    }
}

/// Idempotent merge: append only records whose id is not yet accumulated.
/// Merging the same page twice therefore yields the same list as merging it
/// once, and first-seen relative order is stable.
pub(crate) fn merge_unique(
    existing: &mut Vec<WallpaperRecord>,
    incoming: Vec<WallpaperRecord>,
) -> usize {
    let mut seen: HashSet<WallpaperId> = existing.iter().map(|w| w.id.clone()).collect();
    let mut appended = 0;
    for record in incoming {
        if seen.insert(record.id.clone()) {
            existing.push(record);
            appended += 1;
        }
    }
    appended
}
