use super::entity::WallpaperRecord;
use crate::domain::{DomainError, DomainResult};

/// Validates all WallpaperRecord invariants
/// These are the absolute rules that must hold for a record to be valid
pub fn validate_wallpaper(record: &WallpaperRecord) -> DomainResult<()> {
    validate_id(record)?;
    validate_urls(record)?;
    validate_dimensions(record)?;
    Ok(())
}

fn validate_id(record: &WallpaperRecord) -> DomainResult<()> {
    if record.id.as_str().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Wallpaper id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Both renditions are required; the provider page URL is required for
/// attribution
fn validate_urls(record: &WallpaperRecord) -> DomainResult<()> {
    for (field, value) in [
        ("full_image_url", &record.full_image_url),
        ("preview_image_url", &record.preview_image_url),
        ("provider_page_url", &record.provider_page_url),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "Wallpaper {} cannot be empty",
                field
            )));
        }
    }
    Ok(())
}

fn validate_dimensions(record: &WallpaperRecord) -> DomainResult<()> {
    if record.width == 0 || record.height == 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Wallpaper dimensions must be positive, got {}x{}",
            record.width, record.height
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Wallpaper domain:
///
/// 1. Identity is `<provider>-<nativeId>` plus a normalized query token
/// 2. The same asset under two different queries is NOT the same record
/// 3. The same asset on two pages of one query IS the same record
/// 4. Full and preview URLs always point at a real rendition
/// 5. Missing upstream dimensions default to 1080x1920 (documented)
/// 6. Author may be a placeholder, never structurally absent
