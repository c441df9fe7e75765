// src/providers/pixabay.rs
//
// Pixabay image search adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_http_client, ImageProvider};
use crate::domain::{WallpaperId, WallpaperRecord};
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "Pixabay";
const API_URL: &str = "https://pixabay.com/api/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<HitData>,
}

#[derive(Debug, Deserialize)]
struct HitData {
    id: u64,
    #[serde(rename = "pageURL")]
    page_url: String,
    /// Comma-separated tag list, e.g. "stars, nebula, night"
    tags: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    user: String,
    user_id: u64,
    #[serde(rename = "imageWidth")]
    image_width: u32,
    #[serde(rename = "imageHeight")]
    image_height: u32,
}

pub struct PixabayProvider {
    http_client: Client,
    api_key: String,
}

impl PixabayProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: build_http_client(),
            api_key,
        }
    }

    fn map_hit(hit: HitData, query: &str) -> WallpaperRecord {
        let tags: Vec<String> = hit
            .tags
            .split(", ")
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let search_hint = tags
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let author_profile_url = format!("https://pixabay.com/users/{}-{}/", hit.user, hit.user_id);

        WallpaperRecord {
            id: WallpaperId::compose("pixabay", &hit.id.to_string(), query),
            full_image_url: hit.large_image_url,
            preview_image_url: hit.webformat_url,
            author: hit.user,
            author_profile_url,
            provider_name: PROVIDER.to_string(),
            provider_page_url: hit.page_url,
            tags,
            search_hint,
            width: hit.image_width,
            height: hit.image_height,
            originating_query: Some(query.to_string()),
        }
    }
}

#[async_trait]
impl ImageProvider for PixabayProvider {
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
            .get(API_URL)
            .query(&[
                ("key", self.api_key.clone()),
                ("q", query.to_string()),
                ("image_type", "photo".to_string()),
                ("orientation", "vertical".to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("safesearch", "true".to_string()),
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
            .hits
            .into_iter()
            .take(per_page)
            .map(|hit| Self::map_hit(hit, query))
            .collect())
    }
}
