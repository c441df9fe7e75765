// src/config/mod.rs
//
// Provider configuration.
//
// Enablement is resolved ONCE at startup from credential presence; the rest
// of the crate only ever sees the resulting enabled/disabled set. A provider
// with no credential is disabled, which is a configuration fact, not a
// runtime failure.

use std::env;

/// Credentials for the upstream image providers, read from the environment.
///
/// A `None` credential disables the corresponding provider; it is excluded
/// from the fan-out entirely and never shows up in failure reports. The
/// public-domain scraper needs no credential and is always enabled.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub pexels_api_key: Option<String>,
    pub pixabay_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    pub nasa_api_key: Option<String>,
}

impl ProviderSettings {
    /// Resolve settings from the process environment. Empty values count as
    /// absent so a blank `.env` line does not enable a provider.
    pub fn from_env() -> Self {
        Self {
            pexels_api_key: non_empty_var("PEXELS_API_KEY"),
            pixabay_api_key: non_empty_var("PIXABAY_API_KEY"),
            unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            nasa_api_key: non_empty_var("NASA_API_KEY"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_have_no_credentials() {
        let settings = ProviderSettings::default();
        assert!(settings.pexels_api_key.is_none());
        assert!(settings.pixabay_api_key.is_none());
        assert!(settings.unsplash_access_key.is_none());
        assert!(settings.nasa_api_key.is_none());
    }
}
