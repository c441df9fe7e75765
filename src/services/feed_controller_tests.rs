// src/services/feed_controller_tests.rs
//
// UNIT TESTS: Feed controller pagination behavior
//
// INVARIANTS TESTED:
// - Merging the same incoming page twice equals merging it once
// - A query change resets cursor, exhaustion, and accumulated items
// - A second load while one is in flight is a no-op (one upstream call)
// - A late response for a superseded query is discarded

#[cfg(test)]
mod dedup_and_reset_tests {
    use std::sync::Arc;

    use crate::domain::{AggregatedPage, WallpaperId, WallpaperRecord};
    use crate::events::EventBus;
    use crate::services::aggregator_service::MockWallpaperSource;
    use crate::services::feed_controller::{FeedController, LoadOutcome};

    pub(super) fn record(n: u32, query: &str) -> WallpaperRecord {
        WallpaperRecord {
            id: WallpaperId::compose("pexels", &n.to_string(), query),
            full_image_url: format!("https://example.com/full/{}.jpg", n),
            preview_image_url: format!("https://example.com/preview/{}.jpg", n),
            author: "Author".to_string(),
            author_profile_url: "https://example.com/author".to_string(),
            provider_name: "Pexels".to_string(),
            provider_page_url: format!("https://example.com/photo/{}", n),
            tags: vec![query.to_string()],
            search_hint: query.to_string(),
            width: 1080,
            height: 1920,
            originating_query: Some(query.to_string()),
        }
    }

    pub(super) fn page(query: &str, ids: &[u32]) -> AggregatedPage {
        AggregatedPage {
            wallpapers: ids.iter().map(|n| record(*n, query)).collect(),
            failed_services: Vec::new(),
        }
    }

    fn controller(mock: MockWallpaperSource) -> FeedController {
        FeedController::new(Arc::new(mock), Arc::new(EventBus::new()), "space")
    }

    #[tokio::test]
    async fn test_merging_same_page_twice_is_idempotent() {
        // The upstream can repeat assets across pages; the merge must not
        // duplicate them.
        let mut mock = MockWallpaperSource::new();
        mock.expect_get_wallpapers()
            .times(2)
            .returning(|_| page("space", &[1, 2, 3]));
        let controller = controller(mock);

        let first = controller.load_more(false).await;
        let items_after_first = controller.items();
        let second = controller.load_more(false).await;
        let items_after_second = controller.items();

        assert_eq!(
            first,
            LoadOutcome::Loaded {
                appended: 3,
                failed_services: Vec::new()
            }
        );
        assert_eq!(
            second,
            LoadOutcome::Loaded {
                appended: 0,
                failed_services: Vec::new()
            }
        );
        assert_eq!(items_after_first, items_after_second);
    }

    #[tokio::test]
    async fn test_duplicates_within_one_page_are_collapsed() {
        let mut mock = MockWallpaperSource::new();
        mock.expect_get_wallpapers()
            .times(1)
            .returning(|_| page("space", &[7, 7, 8]));
        let controller = controller(mock);

        controller.load_more(false).await;
        assert_eq!(controller.items().len(), 2);
    }

    #[tokio::test]
    async fn test_first_seen_order_is_stable_across_merges() {
        let mut mock = MockWallpaperSource::new();
        let mut pages = vec![page("space", &[2, 1, 3]), page("space", &[3, 4, 1, 5])].into_iter();
        mock.expect_get_wallpapers()
            .times(2)
            .returning(move |_| pages.next().unwrap());
        let controller = controller(mock);

        controller.load_more(false).await;
        controller.load_more(false).await;

        let natives: Vec<String> = controller
            .items()
            .iter()
            .map(|w| w.id.as_str().to_string())
            .collect();
        assert_eq!(
            natives,
            vec![
                "pexels-2-space",
                "pexels-1-space",
                "pexels-3-space",
                "pexels-4-space",
                "pexels-5-space"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_page_marks_exhaustion_and_stops_fetching() {
        let mut mock = MockWallpaperSource::new();
        let mut pages = vec![page("space", &[1, 2]), page("space", &[])].into_iter();
        mock.expect_get_wallpapers()
            .times(2)
            .returning(move |_| pages.next().unwrap());
        let controller = controller(mock);

        assert!(matches!(
            controller.load_more(false).await,
            LoadOutcome::Loaded { .. }
        ));
        assert_eq!(controller.load_more(false).await, LoadOutcome::Exhausted);
        assert!(controller.is_exhausted());

        // Third call must not reach the source (times(2) above enforces it)
        assert_eq!(controller.load_more(false).await, LoadOutcome::Exhausted);
    }

    #[tokio::test]
    async fn test_empty_first_page_of_new_query_does_not_exhaust() {
        let mut mock = MockWallpaperSource::new();
        mock.expect_get_wallpapers()
            .times(1)
            .returning(|_| page("space", &[]));
        let controller = controller(mock);

        let outcome = controller.load_more(true).await;
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                appended: 0,
                failed_services: Vec::new()
            }
        );
        assert!(!controller.is_exhausted());
    }

    #[tokio::test]
    async fn test_query_change_resets_context_even_after_exhaustion() {
        let mut mock = MockWallpaperSource::new();
        let mut pages = vec![page("space", &[1, 2]), page("space", &[])].into_iter();
        mock.expect_get_wallpapers()
            .times(2)
            .returning(move |_| pages.next().unwrap());
        let controller = controller(mock);

        controller.load_more(false).await;
        controller.load_more(false).await;
        assert!(controller.is_exhausted());

        assert!(controller.on_query_change("cyberpunk"));

        assert_eq!(controller.current_query(), "cyberpunk");
        assert_eq!(controller.next_page(), 1);
        assert!(!controller.is_exhausted());
        assert!(controller.items().is_empty());
    }

    #[tokio::test]
    async fn test_same_query_is_not_a_change() {
        let mock = MockWallpaperSource::new();
        let controller = controller(mock);
        assert!(!controller.on_query_change("space"));
    }

    #[tokio::test]
    async fn test_proximity_trigger_near_end_of_list() {
        let mut mock = MockWallpaperSource::new();
        mock.expect_get_wallpapers()
            .times(1)
            .returning(|_| page("space", &[1, 2, 3, 4, 5]));
        let controller = controller(mock);
        controller.load_more(false).await;

        assert!(!controller.should_load_more(0));
        assert!(!controller.should_load_more(2));
        assert!(controller.should_load_more(3));
        assert!(controller.should_load_more(4));
    }
}

#[cfg(test)]
mod in_flight_and_stale_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::{Notify, Semaphore};

    use super::dedup_and_reset_tests::page;
    use crate::domain::AggregatedPage;
    use crate::events::EventBus;
    use crate::services::aggregator_service::{WallpaperQuery, WallpaperSource};
    use crate::services::feed_controller::{FeedController, LoadOutcome};

    /// Source whose first call suspends until the test releases the gate,
    /// so a fetch can be held "in flight" deterministically.
    struct GatedSource {
        calls: AtomicUsize,
        entered: Notify,
        gate: Semaphore,
    }

    impl GatedSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                entered: Notify::new(),
                gate: Semaphore::new(0),
            }
        }

        fn release(&self) {
            self.gate.add_permits(1);
        }
    }

    #[async_trait]
    impl WallpaperSource for GatedSource {
        async fn get_wallpapers(&self, request: WallpaperQuery) -> AggregatedPage {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                self.entered.notify_one();
                let permit = self.gate.acquire().await.unwrap();
                permit.forget();
            }
            let base = request.page * 10;
            page(&request.query, &[base + 1, base + 2, base + 3])
        }
    }

    fn gated_controller() -> (Arc<GatedSource>, Arc<FeedController>) {
        let source = Arc::new(GatedSource::new());
        let controller = Arc::new(FeedController::new(
            source.clone(),
            Arc::new(EventBus::new()),
            "space",
        ));
        (source, controller)
    }

    #[tokio::test]
    async fn test_load_while_fetch_in_flight_is_a_noop() {
        let (source, controller) = gated_controller();

        let background = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.load_more(false).await })
        };
        source.entered.notified().await;
        assert!(controller.is_loading());

        // The proximity trigger firing again must not start a second fetch
        let second = controller.load_more(false).await;
        assert_eq!(second, LoadOutcome::InFlight);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        source.release();
        let first = background.await.unwrap();
        assert!(matches!(first, LoadOutcome::Loaded { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_late_response_for_superseded_query_is_discarded() {
        let (source, controller) = gated_controller();

        // A "space" fetch goes out and is held in flight
        let background = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.load_more(false).await })
        };
        source.entered.notified().await;

        // The user switches to "cyberpunk" while "space" is still pending
        assert!(controller.on_query_change("cyberpunk"));
        let fresh = controller.load_more(true).await;
        assert!(matches!(fresh, LoadOutcome::Loaded { appended: 3, .. }));

        // The stale "space" response finally arrives and must be dropped
        source.release();
        let stale = background.await.unwrap();
        assert_eq!(stale, LoadOutcome::Stale);

        let items = controller.items();
        assert!(!items.is_empty());
        assert!(items
            .iter()
            .all(|w| w.originating_query.as_deref() == Some("cyberpunk")));
        assert_eq!(controller.next_page(), 2);
        assert!(!controller.is_loading());
    }
}
