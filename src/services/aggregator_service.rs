// src/services/aggregator_service.rs
//
// Aggregator - the fan-out heart of the engine.
//
// One logical search fans out to every enabled provider concurrently,
// waits for all of them to settle (a join-all barrier, not a race), and
// merges whatever succeeded into one randomized page. Partial failure is
// success at this layer: callers always receive a page plus the names of
// the providers that errored, never an exception.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::AggregatedPage;
use crate::events::{EventBus, PageAggregated, ProviderFailed};
use crate::providers::ImageProvider;

/// One logical search request as the presentation layer phrases it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperQuery {
    pub query: String,
    /// 1-based page cursor
    pub page: u32,
    /// Desired merged page size; the result may run slightly over when the
    /// per-provider split rounds up, or under when upstream pages are short
    pub per_page: usize,
}

/// Seam between the feed layer and the aggregation engine, mockable in
/// controller tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WallpaperSource: Send + Sync {
    async fn get_wallpapers(&self, request: WallpaperQuery) -> AggregatedPage;
}

pub struct AggregatorService {
    /// Enabled adapter set, static per process (resolved from configuration
    /// before construction; disabled providers never make it in here)
    providers: Vec<Arc<dyn ImageProvider>>,
    event_bus: Arc<EventBus>,
    /// Injected random source so the shuffle is reproducible under test
    rng: Mutex<StdRng>,
}

impl AggregatorService {
    pub fn new(providers: Vec<Arc<dyn ImageProvider>>, event_bus: Arc<EventBus>) -> Self {
        Self::with_rng(providers, event_bus, StdRng::from_entropy())
    }

    /// Deterministic shuffle order for tests.
    pub fn with_seed(
        providers: Vec<Arc<dyn ImageProvider>>,
        event_bus: Arc<EventBus>,
        seed: u64,
    ) -> Self {
        Self::with_rng(providers, event_bus, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        providers: Vec<Arc<dyn ImageProvider>>,
        event_bus: Arc<EventBus>,
        rng: StdRng,
    ) -> Self {
        Self {
            providers,
            event_bus,
            rng: Mutex::new(rng),
        }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

/// Split the requested page size across providers, rounding up so the
/// merged result approximates the request regardless of provider count.
fn per_service_page_size(per_page: usize, provider_count: usize) -> usize {
    (per_page + provider_count - 1) / provider_count
}

#[async_trait]
impl WallpaperSource for AggregatorService {
    async fn get_wallpapers(&self, request: WallpaperQuery) -> AggregatedPage {
        if self.providers.is_empty() {
            // Configuration problem, not a runtime failure: no provider was
            // attempted, so the failure list stays empty too.
            warn!("No image providers are configured; returning an empty page");
            return AggregatedPage::default();
        }

        let per_service = per_service_page_size(request.per_page, self.providers.len());

        let calls = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let query = request.query.clone();
            let page = request.page;
            async move {
                let result = provider.search(&query, page, per_service).await;
                (provider.name(), result)
            }
        });

        // Join-all barrier: every call settles before we continue, but the
        // calls themselves run concurrently with no ordering guarantee.
        let settled = join_all(calls).await;

        let mut wallpapers = Vec::new();
        let mut failed_services = Vec::new();

        for (name, result) in settled {
            match result {
                Ok(records) => {
                    debug!("{} supplied {} records", name, records.len());
                    for record in records {
                        // Adapters normalize defaults, so a failing record
                        // means a broken mapping; drop it rather than hand
                        // the UI an unrenderable entry.
                        match crate::domain::validate_wallpaper(&record) {
                            Ok(()) => wallpapers.push(record),
                            Err(err) => debug!("dropping invalid record from {}: {}", name, err),
                        }
                    }
                }
                Err(err) => {
                    warn!("Error fetching from {}: {}", name, err);
                    self.event_bus.emit(ProviderFailed::new(
                        name.to_string(),
                        request.query.clone(),
                        request.page,
                        err.to_string(),
                    ));
                    failed_services.push(name.to_string());
                }
            }
        }

        // Uniform shuffle so providers are not visually grouped
        {
            let mut rng = self.rng.lock().unwrap();
            wallpapers.shuffle(&mut *rng);
        }

        info!(
            "aggregated {} wallpapers for '{}' page {} ({} provider(s) failed)",
            wallpapers.len(),
            request.query,
            request.page,
            failed_services.len()
        );
        self.event_bus.emit(PageAggregated::new(
            request.query,
            request.page,
            wallpapers.len(),
            failed_services.clone(),
        ));

        AggregatedPage {
            wallpapers,
            failed_services,
        }
    }
}
