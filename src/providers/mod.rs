// src/providers/mod.rs
//
// Upstream image providers.
//
// Each adapter wraps one third-party photo source behind the common
// `ImageProvider` contract: map upstream-native fields into
// `WallpaperRecord`, never return more than `per_page` records, and surface
// transport/payload problems as `AppError` so the aggregator can convert
// them into a failure report instead of letting one provider abort its
// siblings. Every adapter builds its HTTP client with a bounded timeout so
// the aggregator's join-all barrier cannot hang on one dead provider.

pub mod nasa;
pub mod pexels;
pub mod pixabay;
pub mod public_domain;
pub mod unsplash;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::info;
use reqwest::Client;

use crate::config::ProviderSettings;
use crate::domain::WallpaperRecord;
use crate::error::AppResult;

pub use nasa::NasaProvider;
pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use public_domain::PublicDomainProvider;
pub use unsplash::UnsplashProvider;

/// Upper bound on any single provider call, keeps the fan-out barrier live
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The uniform search contract every upstream source is wrapped in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Stable display name, also used in failure reports
    fn name(&self) -> &'static str;

    /// Fetch one page of normalized records for `query`.
    ///
    /// Returns at most `per_page` records; fewer when the upstream page
    /// runs short. Errors are returned, never panicked, so the caller can
    /// convert them into a per-provider failure entry.
    async fn search(&self, query: &str, page: u32, per_page: usize)
        -> AppResult<Vec<WallpaperRecord>>;
}

/// Build the HTTP client shared pattern of all adapters.
fn build_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Resolve the enabled adapter set from configuration, once at startup.
///
/// A provider without a credential is disabled: it is excluded here, before
/// any fan-out, and therefore can never appear in `failed_services`. The
/// public-domain scraper has no credential and is always enabled.
pub fn enabled_providers(settings: &ProviderSettings) -> Vec<Arc<dyn ImageProvider>> {
    let mut providers: Vec<Arc<dyn ImageProvider>> = Vec::new();

    match &settings.pexels_api_key {
        Some(key) => providers.push(Arc::new(PexelsProvider::new(key.clone()))),
        None => info!("Pexels API key is not configured; provider disabled"),
    }
    match &settings.pixabay_api_key {
        Some(key) => providers.push(Arc::new(PixabayProvider::new(key.clone()))),
        None => info!("Pixabay API key is not configured; provider disabled"),
    }
    match &settings.unsplash_access_key {
        Some(key) => providers.push(Arc::new(UnsplashProvider::new(key.clone()))),
        None => info!("Unsplash access key is not configured; provider disabled"),
    }
    match &settings.nasa_api_key {
        Some(key) => providers.push(Arc::new(NasaProvider::new(key.clone()))),
        None => info!("NASA API key is not configured; provider disabled"),
    }

    providers.push(Arc::new(PublicDomainProvider::new()));

    providers
}
