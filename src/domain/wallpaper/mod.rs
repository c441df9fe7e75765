// src/domain/wallpaper/mod.rs

pub mod entity;
pub mod invariants;

pub use entity::{WallpaperId, WallpaperRecord, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use invariants::validate_wallpaper;
