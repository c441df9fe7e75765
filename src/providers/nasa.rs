// src/providers/nasa.rs
//
// NASA Astronomy Picture of the Day adapter.
//
// APOD has no search or page semantics: the API hands back `count` random
// entries, so the query and page arguments are ignored. Repeats across
// successive pages are absorbed downstream by the feed controller's id
// dedup. Entries are dated, not numbered, so the date doubles as the
// provider-native id.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use super::{build_http_client, ImageProvider};
use crate::domain::{WallpaperId, WallpaperRecord};
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "NASA";
const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

/// APOD images carry no standard dimensions; landscape defaults match the
/// typical telescope-frame shape of the archive.
const APOD_WIDTH: u32 = 1920;
const APOD_HEIGHT: u32 = 1080;

#[derive(Debug, Deserialize)]
struct ApodEntry {
    date: String,
    title: String,
    media_type: String,
    /// Standard-resolution rendition
    url: String,
    /// High-resolution rendition, absent for some entries
    hdurl: Option<String>,
    copyright: Option<String>,
}

pub struct NasaProvider {
    http_client: Client,
    api_key: String,
}

impl NasaProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: build_http_client(),
            api_key,
        }
    }

    fn map_entry(entry: ApodEntry, query: &str) -> WallpaperRecord {
        // Dates outside the `YYYY-MM-DD` shape would make ids unstable
        // across fetches; normalize through chrono when they parse.
        let parsed_date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").ok();
        let native_id = parsed_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or(entry.date);

        // Per-day pages are keyed by a `yymmdd` suffix; a date chrono could
        // not parse has no such page, so point at the archive instead.
        let provider_page_url = match parsed_date {
            Some(d) => format!("https://apod.nasa.gov/apod/ap{}.html", d.format("%y%m%d")),
            None => "https://apod.nasa.gov/apod/archivepix.html".to_string(),
        };

        let author = entry
            .copyright
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "NASA".to_string());

        let mut tags = Vec::new();
        if let Some(first_word) = entry.title.split_whitespace().next() {
            tags.push(first_word.to_lowercase());
        }
        tags.push("space".to_string());

        let full_image_url = entry.hdurl.unwrap_or_else(|| entry.url.clone());

        WallpaperRecord {
            id: WallpaperId::compose("nasa", &native_id, query),
            full_image_url,
            preview_image_url: entry.url,
            author,
            author_profile_url: "https://apod.nasa.gov/apod/".to_string(),
            provider_name: PROVIDER.to_string(),
            provider_page_url,
            tags,
            search_hint: "nasa space".to_string(),
            width: APOD_WIDTH,
            height: APOD_HEIGHT,
            originating_query: Some(query.to_string()),
        }
    }
}

#[async_trait]
impl ImageProvider for NasaProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(
        &self,
        query: &str,
        _page: u32,
        per_page: usize,
    ) -> AppResult<Vec<WallpaperRecord>> {
        let response = self
            .http_client
            .get(APOD_URL)
            .query(&[
                ("api_key", self.api_key.clone()),
                ("count", per_page.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let entries: Vec<ApodEntry> = response.json().await?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.media_type == "image")
            .take(per_page)
            .map(|entry| Self::map_entry(entry, query))
            .collect())
    }
}
