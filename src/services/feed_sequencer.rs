// src/services/feed_sequencer.rs
//
// Ad-interleaving sequencer.
//
// Pure and deterministic: the randomness of the feed lives entirely in the
// aggregator's shuffle, which runs before this step. The sequence is
// recomputed from scratch whenever the wallpaper list changes so placeholder
// positions can never drift from the running wallpaper count.

use crate::domain::{FeedItem, WallpaperRecord};

/// How many wallpapers appear between ad placeholders.
pub const DEFAULT_AD_CADENCE: usize = 4;

/// Derive the render-ready sequence from the wallpaper list.
///
/// Walks the list in order and inserts one ad placeholder immediately after
/// every `cadence`-th wallpaper, counting wallpapers only (1-based). A
/// cadence of zero disables interleaving.
pub fn interleave(wallpapers: &[WallpaperRecord], cadence: usize) -> Vec<FeedItem> {
    if cadence == 0 {
        return wallpapers.iter().cloned().map(FeedItem::Wallpaper).collect();
    }

    let ad_count = wallpapers.len() / cadence;
    let mut feed = Vec::with_capacity(wallpapers.len() + ad_count);

    for (index, wallpaper) in wallpapers.iter().enumerate() {
        feed.push(FeedItem::Wallpaper(wallpaper.clone()));
        if (index + 1) % cadence == 0 {
            feed.push(FeedItem::AdSlot);
        }
    }

    feed
}
