// src/providers/pexels.rs
//
// Pexels photo search adapter.
//
// Maps the Pexels REST search API into WallpaperRecord. Portrait
// orientation is requested so results fit the phone-wallpaper shape.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;

use super::{build_http_client, ImageProvider};
use crate::domain::{WallpaperId, WallpaperRecord};
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "Pexels";
const SEARCH_URL: &str = "https://api.pexels.com/v1/search";

/// Search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: Vec<PhotoData>,
}

#[derive(Debug, Deserialize)]
struct PhotoData {
    id: u64,
    width: u32,
    height: u32,
    /// Deep link to the photo's listing page
    url: String,
    photographer: String,
    photographer_url: String,
    alt: Option<String>,
    src: SrcData,
}

#[derive(Debug, Deserialize)]
struct SrcData {
    original: String,
    large: String,
}

pub struct PexelsProvider {
    http_client: Client,
    api_key: String,
}

impl PexelsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: build_http_client(),
            api_key,
        }
    }

    fn map_photo(photo: PhotoData, query: &str) -> WallpaperRecord {
        let search_hint = photo
            .alt
            .as_deref()
            .filter(|alt| !alt.trim().is_empty())
            .map(|alt| WallpaperRecord::hint_from(alt, 2))
            .unwrap_or_else(|| WallpaperRecord::hint_from(query, 2));

        WallpaperRecord {
            id: WallpaperId::compose("pexels", &photo.id.to_string(), query),
            full_image_url: photo.src.original,
            preview_image_url: photo.src.large,
            author: photo.photographer,
            author_profile_url: photo.photographer_url,
            provider_name: PROVIDER.to_string(),
            provider_page_url: photo.url,
            tags: query.split_whitespace().map(str::to_string).collect(),
            search_hint,
            width: photo.width,
            height: photo.height,
            originating_query: Some(query.to_string()),
        }
    }
}

#[async_trait]
impl ImageProvider for PexelsProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: usize,
    ) -> AppResult<Vec<WallpaperRecord>> {
        let response = self
            .http_client
            .get(SEARCH_URL)
            .header(header::AUTHORIZATION, self.api_key.as_str())
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("orientation", "portrait".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let data: SearchResponse = response.json().await?;

        Ok(data
            .photos
            .into_iter()
            .take(per_page)
            .map(|photo| Self::map_photo(photo, query))
            .collect())
    }
}
