// src/providers/unsplash.rs
//
// Unsplash photo search adapter.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;

use super::{build_http_client, ImageProvider};
use crate::domain::{WallpaperId, WallpaperRecord};
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "Unsplash";
const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<PhotoData>,
}

#[derive(Debug, Deserialize)]
struct PhotoData {
    id: String,
    width: u32,
    height: u32,
    alt_description: Option<String>,
    urls: UrlsData,
    links: LinksData,
    user: UserData,
    tags: Option<Vec<TagData>>,
}

#[derive(Debug, Deserialize)]
struct UrlsData {
    full: String,
    regular: String,
}

#[derive(Debug, Deserialize)]
struct LinksData {
    html: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    name: String,
    links: UserLinksData,
}

#[derive(Debug, Deserialize)]
struct UserLinksData {
    html: String,
}

#[derive(Debug, Deserialize)]
struct TagData {
    title: Option<String>,
}

pub struct UnsplashProvider {
    http_client: Client,
    access_key: String,
}

impl UnsplashProvider {
    pub fn new(access_key: String) -> Self {
        Self {
            http_client: build_http_client(),
            access_key,
        }
    }

    fn map_photo(photo: PhotoData, query: &str) -> WallpaperRecord {
        let tags: Vec<String> = photo
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| t.title)
            .collect();
        let search_hint = photo
            .alt_description
            .as_deref()
            .filter(|alt| !alt.trim().is_empty())
            .map(|alt| WallpaperRecord::hint_from(alt, 2))
            .unwrap_or_else(|| WallpaperRecord::hint_from(query, 2));

        WallpaperRecord {
            id: WallpaperId::compose("unsplash", &photo.id, query),
            full_image_url: photo.urls.full,
            preview_image_url: photo.urls.regular,
            author: photo.user.name,
            author_profile_url: photo.user.links.html,
            provider_name: PROVIDER.to_string(),
            provider_page_url: photo.links.html,
            tags,
            search_hint,
            width: photo.width,
            height: photo.height,
            originating_query: Some(query.to_string()),
        }
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
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
            .header(
                header::AUTHORIZATION,
                format!("Client-ID {}", self.access_key),
            )
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
            .results
            .into_iter()
            .take(per_page)
            .map(|photo| Self::map_photo(photo, query))
            .collect())
    }
}
