use serde::{Deserialize, Serialize};

/// Fallback portrait dimensions for providers that do not report real ones.
/// Callers must not assume these reflect the actual asset.
pub const DEFAULT_WIDTH: u32 = 1080;
pub const DEFAULT_HEIGHT: u32 = 1920;

/// Identifier for a wallpaper, unique across providers and across queries.
///
/// Composed as `<provider>-<nativeId>` plus a normalized token of the query
/// that produced the record. The token keeps the same physical asset fetched
/// under two different queries distinct, while page merges of a single query
/// still recognize repeats of one asset as identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallpaperId(String);

impl WallpaperId {
    /// Compose an id from the provider slug and the provider-native id.
    pub fn compose(provider: &str, native_id: &str, query: &str) -> Self {
        let token = normalize_query_token(query);
        if token.is_empty() {
            Self(format!("{}-{}", provider, native_id))
        } else {
            Self(format!("{}-{}-{}", provider, native_id, token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WallpaperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case the query and collapse runs of non-alphanumeric characters
/// into single dashes, so "Deep  Space!" and "deep space" yield one token.
fn normalize_query_token(query: &str) -> String {
    let mut token = String::with_capacity(query.len());
    let mut pending_dash = false;
    for c in query.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !token.is_empty() {
                token.push('-');
            }
            pending_dash = false;
            token.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    token
}

/// The canonical normalized wallpaper unit.
///
/// Every provider adapter maps its upstream-native shape into this record;
/// fields the upstream omits get documented defaults instead of propagating
/// as missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperRecord {
    /// Globally unique identifier, see [`WallpaperId`]
    pub id: WallpaperId,

    /// URL of the full-resolution asset
    pub full_image_url: String,

    /// Smaller, faster-loading rendition of the same asset
    pub preview_image_url: String,

    /// Attribution; may be a placeholder when the provider omits it
    pub author: String,
    pub author_profile_url: String,

    /// Source identification, required for attribution and license compliance
    pub provider_name: String,
    pub provider_page_url: String,

    /// Ordered tags, may be empty
    pub tags: Vec<String>,

    /// Short descriptive phrase derived from tags/title, used for
    /// accessibility text and image hints
    pub search_hint: String,

    /// Reported or defaulted dimensions; not guaranteed accurate
    pub width: u32,
    pub height: u32,

    /// The query that produced this record, when known
    pub originating_query: Option<String>,
}

impl WallpaperRecord {
    /// Derive a search hint from the first words of a descriptive phrase.
    pub fn hint_from(text: &str, words: usize) -> String {
        text.split_whitespace()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_composition_is_query_scoped() {
        let a = WallpaperId::compose("pexels", "123", "space");
        let b = WallpaperId::compose("pexels", "123", "cyberpunk");
        assert_ne!(a, b);
        assert_eq!(a, WallpaperId::compose("pexels", "123", "space"));
    }

    #[test]
    fn test_query_token_normalization() {
        let a = WallpaperId::compose("pixabay", "9", "Deep  Space!");
        let b = WallpaperId::compose("pixabay", "9", "deep space");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "pixabay-9-deep-space");
    }

    #[test]
    fn test_empty_query_omits_token() {
        let id = WallpaperId::compose("nasa", "2024-01-01", "");
        assert_eq!(id.as_str(), "nasa-2024-01-01");
    }

    #[test]
    fn test_hint_from_takes_leading_words() {
        assert_eq!(
            WallpaperRecord::hint_from("A Galaxy Far Away", 2),
            "a galaxy"
        );
        assert_eq!(WallpaperRecord::hint_from("", 2), "");
    }
}
