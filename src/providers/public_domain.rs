// src/providers/public_domain.rs
//
// Public Domain Pictures scraper adapter.
//
// There is no API: search results are scraped from the public listing
// pages. Extraction is regex-based and deliberately tolerant; markup the
// heuristics do not recognize yields fewer records, never an error. The
// listing shows one artist link per thumbnail, so thumbnails and artist
// links are paired up positionally.

use async_trait::async_trait;
use regex::Regex;
use reqwest::{header, Client, Url};

use super::{build_http_client, ImageProvider};
use crate::domain::wallpaper::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::domain::{WallpaperId, WallpaperRecord};
use crate::error::{AppError, AppResult};

const PROVIDER: &str = "Public Domain Pictures";
const BASE_URL: &str = "https://www.publicdomainpictures.net/en/";

// The site rejects requests without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub struct PublicDomainProvider {
    http_client: Client,
    base_url: Url,
    anchor_re: Regex,
    img_re: Regex,
    alt_re: Regex,
    artist_re: Regex,
    dim_re: Regex,
}

impl PublicDomainProvider {
    pub fn new() -> Self {
        Self {
            http_client: build_http_client(),
            base_url: Url::parse(BASE_URL).expect("base URL is valid"),
            anchor_re: Regex::new(
                r#"(?s)<a[^>]+href="([^"]*view-image\.php\?image=(\d+)[^"]*)"[^>]*>(.*?)</a>"#,
            )
            .expect("anchor regex is valid"),
            img_re: Regex::new(r#"<img[^>]+src="([^"]+)""#).expect("img regex is valid"),
            alt_re: Regex::new(r#"alt="([^"]*)""#).expect("alt regex is valid"),
            artist_re: Regex::new(r#"<a[^>]+href="([^"]*view-artist\.php[^"]*)"[^>]*>([^<]*)</a>"#)
                .expect("artist regex is valid"),
            dim_re: Regex::new(r"-(\d+)x(\d+)\.jpg$").expect("dimension regex is valid"),
        }
    }

    /// Pull dimensions out of the `...-1920x1280.jpg` thumbnail suffix.
    /// Falls back to the documented portrait defaults.
    fn dimensions_from_url(&self, url: &str) -> (u32, u32) {
        if let Some(caps) = self.dim_re.captures(url) {
            let width = caps[1].parse().unwrap_or(DEFAULT_WIDTH);
            let height = caps[2].parse().unwrap_or(DEFAULT_HEIGHT);
            return (width, height);
        }
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    fn join(&self, href: &str) -> AppResult<Url> {
        self.base_url
            .join(href)
            .map_err(|e| AppError::MalformedResponse {
                provider: PROVIDER,
                detail: format!("bad link '{}': {}", href, e),
            })
    }

    /// Extract wallpaper records from one listing page.
    fn parse_listing(
        &self,
        html: &str,
        query: &str,
        per_page: usize,
    ) -> AppResult<Vec<WallpaperRecord>> {
        let artists: Vec<(String, String)> = self
            .artist_re
            .captures_iter(html)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect();

        let mut wallpapers = Vec::new();

        for (index, caps) in self.anchor_re.captures_iter(html).enumerate() {
            if wallpapers.len() >= per_page {
                break;
            }

            let page_href = &caps[1];
            let native_id = &caps[2];
            let body = &caps[3];

            let preview_src = match self.img_re.captures(body) {
                Some(img) => img[1].to_string(),
                None => continue, // text-only link, not a thumbnail
            };

            let title = self
                .alt_re
                .captures(body)
                .map(|alt| alt[1].trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| query.to_string());

            let page_url = self.join(page_href)?;
            let preview_url = self.join(&preview_src)?;
            let preview = preview_url.to_string();

            // Full-size assets live under /images/ at the same path the
            // /pictures/ thumbnail uses.
            let full = preview.replace("/pictures/", "/images/");
            let (width, height) = self.dimensions_from_url(&preview);

            let (author_profile_url, author) = match artists.get(index) {
                Some((href, name)) if !name.is_empty() => {
                    (self.join(href)?.to_string(), name.clone())
                }
                _ => (BASE_URL.to_string(), "Unknown Artist".to_string()),
            };

            wallpapers.push(WallpaperRecord {
                id: WallpaperId::compose("publicdomain", native_id, query),
                full_image_url: full,
                preview_image_url: preview,
                author,
                author_profile_url,
                provider_name: PROVIDER.to_string(),
                provider_page_url: page_url.to_string(),
                tags: title.split_whitespace().map(str::to_lowercase).collect(),
                search_hint: WallpaperRecord::hint_from(&title, 2),
                width,
                height,
                originating_query: Some(query.to_string()),
            });
        }

        Ok(wallpapers)
    }
}

impl Default for PublicDomainProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for PublicDomainProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: usize,
    ) -> AppResult<Vec<WallpaperRecord>> {
        let listing_url = self.join("browse-pictures.php")?;
        let response = self
            .http_client
            .get(listing_url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("search", query.to_string()), ("page", page.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        self.parse_listing(&html, query, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <table width="98%">
          <tr>
            <td align="center" valign="top">
              <a href="view-image.php?image=12345&picture=night-sky" title="Night Sky">
                <img src="/pictures/40000/nahled/night-sky-1280x1920.jpg" alt="Night Sky">
              </a>
              <br>
              <a href="view-artist.php?artist=astra">Astra Nova</a>
            </td>
            <td align="center" valign="top">
              <a href="view-image.php?image=67890&picture=misty-forest" title="Misty Forest">
                <img src="/pictures/50000/nahled/misty-forest.jpg" alt="Misty Forest">
              </a>
              <br>
              <a href="view-artist.php?artist=lumen">Lumen Sol</a>
            </td>
          </tr>
        </table>
    "#;

    #[test]
    fn test_parse_listing_extracts_records() {
        let provider = PublicDomainProvider::new();
        let records = provider.parse_listing(LISTING, "night", 10).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id.as_str(), "publicdomain-12345-night");
        assert_eq!(first.author, "Astra Nova");
        assert_eq!(
            first.preview_image_url,
            "https://www.publicdomainpictures.net/pictures/40000/nahled/night-sky-1280x1920.jpg"
        );
        assert_eq!(
            first.full_image_url,
            "https://www.publicdomainpictures.net/images/40000/nahled/night-sky-1280x1920.jpg"
        );
        assert_eq!((first.width, first.height), (1280, 1920));
        assert_eq!(first.search_hint, "night sky");
        assert!(first
            .provider_page_url
            .contains("view-image.php?image=12345"));
    }

    #[test]
    fn test_parse_listing_defaults_dimensions_when_not_in_url() {
        let provider = PublicDomainProvider::new();
        let records = provider.parse_listing(LISTING, "forest", 10).unwrap();
        let second = &records[1];
        assert_eq!((second.width, second.height), (1080, 1920));
    }

    #[test]
    fn test_parse_listing_honors_per_page() {
        let provider = PublicDomainProvider::new();
        let records = provider.parse_listing(LISTING, "night", 1).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_listing_empty_page_yields_no_records() {
        let provider = PublicDomainProvider::new();
        let records = provider
            .parse_listing("<html><body>No results.</body></html>", "night", 10)
            .unwrap();
        assert!(records.is_empty());
    }
}
