// src/services/feed_service_tests.rs
//
// FEED ASSEMBLY UNIT TESTS
//
// PURPOSE:
// - Prove the merge order is the concatenation order (catalog, rosters,
//   sponsored) with no re-sorting
// - Prove search/category filters touch catalog rows only
// - Prove the sponsored slot appears exactly once and only when enabled
// - Prove subscription annotation follows the viewer's channel set

#[cfg(test)]
mod assembly_tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::db::{create_test_pool, get_connection, initialize_database};
    use crate::domain::{
        ChannelDirectory, FeedEntryKind, FeedQuery, Video, USER_UPLOADS_CHANNEL,
    };
    use crate::repositories::{SqliteVideoRepository, VideoRepository};
    use crate::services::FeedService;

    fn service_with_catalog(titles_categories: &[(&str, &str)]) -> FeedService {
        let pool = Arc::new(create_test_pool().unwrap());
        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
        }

        let video_repo = SqliteVideoRepository::new(Arc::clone(&pool));
        for (title, category) in titles_categories {
            let video = Video::new(
                title.to_string(),
                PathBuf::from(format!("/media/{}.mp4", title.replace(' ', "_"))),
                None,
            )
            .with_category(Some(category.to_string()));
            video_repo.insert(&video).unwrap();
        }

        FeedService::new(
            Arc::new(SqliteVideoRepository::new(pool)),
            Arc::new(ChannelDirectory::builtin()),
        )
    }

    fn no_subs() -> BTreeSet<String> {
        BTreeSet::new()
    }

    #[test]
    fn test_full_feed_contains_every_source_once() {
        let service = service_with_catalog(&[("Tech Review Redux", "Tech"), ("Cat Clip", "General")]);

        let feed = service
            .assemble(&FeedQuery::everything().with_ads(), &no_subs())
            .unwrap();

        let catalog = feed
            .iter()
            .filter(|e| matches!(e.kind, FeedEntryKind::Catalog { .. }))
            .count();
        let roster = feed
            .iter()
            .filter(|e| e.kind == FeedEntryKind::Roster)
            .count();
        let sponsored = feed
            .iter()
            .filter(|e| e.kind == FeedEntryKind::Sponsored)
            .count();

        assert_eq!(catalog, 2);
        // TechReviews and NatureChannel ship three roster titles each
        assert_eq!(roster, 6);
        assert_eq!(sponsored, 1);
        assert_eq!(feed.len(), 9);
    }

    #[test]
    fn test_order_is_catalog_then_rosters_then_ad() {
        let service = service_with_catalog(&[("Cat Clip", "General")]);

        let feed = service
            .assemble(&FeedQuery::everything().with_ads(), &no_subs())
            .unwrap();

        assert!(matches!(feed[0].kind, FeedEntryKind::Catalog { .. }));

        // Rosters follow directory order: TechReviews before NatureChannel
        assert_eq!(feed[1].channel, "TechReviews");
        assert_eq!(feed[1].title, "Tech Review");
        assert_eq!(feed[4].channel, "NatureChannel");

        // The sponsored slot is last and not playable
        let last = feed.last().unwrap();
        assert_eq!(last.kind, FeedEntryKind::Sponsored);
        assert!(!last.is_playable());
    }

    #[test]
    fn test_search_filters_catalog_rows_only() {
        let service = service_with_catalog(&[("Tech Talk", "Education"), ("Cat Clip", "General")]);

        let feed = service
            .assemble(&FeedQuery::search("tech"), &no_subs())
            .unwrap();

        // Catalog side matched case-insensitively
        let catalog_titles: Vec<&str> = feed
            .iter()
            .filter(|e| matches!(e.kind, FeedEntryKind::Catalog { .. }))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(catalog_titles, vec!["Tech Talk"]);

        // Roster titles that do NOT contain the search text are still there
        assert!(feed
            .iter()
            .any(|e| e.kind == FeedEntryKind::Roster && e.title == "Nature Documentary"));

        // No ad was requested
        assert!(feed.iter().all(|e| e.kind != FeedEntryKind::Sponsored));
    }

    #[test]
    fn test_category_filter_is_exact_and_catalog_only() {
        let service = service_with_catalog(&[("Tech Talk", "Tech"), ("Tech News", "News")]);

        let feed = service
            .assemble(&FeedQuery::category("Tech"), &no_subs())
            .unwrap();

        let catalog_titles: Vec<&str> = feed
            .iter()
            .filter(|e| matches!(e.kind, FeedEntryKind::Catalog { .. }))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(catalog_titles, vec!["Tech Talk"]);

        // Rosters ignore the category filter
        assert!(feed.iter().any(|e| e.kind == FeedEntryKind::Roster));
    }

    #[test]
    fn test_subscription_annotation() {
        let service = service_with_catalog(&[("Cat Clip", "General")]);

        let mut subs = BTreeSet::new();
        subs.insert("TechReviews".to_string());
        subs.insert(USER_UPLOADS_CHANNEL.to_string());

        let feed = service
            .assemble(&FeedQuery::everything(), &subs)
            .unwrap();

        for entry in &feed {
            let expected = subs.contains(&entry.channel);
            assert_eq!(
                entry.subscribed, expected,
                "channel {:?} annotated wrongly",
                entry.channel
            );
        }
    }

    #[test]
    fn test_empty_catalog_no_ads_yields_rosters_only() {
        let service = service_with_catalog(&[]);

        let feed = service
            .assemble(&FeedQuery::everything(), &no_subs())
            .unwrap();

        assert!(!feed.is_empty());
        assert!(feed.iter().all(|e| e.kind == FeedEntryKind::Roster));
    }

    #[test]
    fn test_assembly_is_stable_for_fixed_state() {
        let service = service_with_catalog(&[("A Clip", "General"), ("B Clip", "General")]);
        let query = FeedQuery::everything().with_ads();

        let first = service.assemble(&query, &no_subs()).unwrap();
        let second = service.assemble(&query, &no_subs()).unwrap();

        let titles = |feed: &[crate::domain::FeedEntry]| {
            feed.iter().map(|e| e.title.clone()).collect::<Vec<_>>()
        };
        assert_eq!(titles(&first), titles(&second));
    }
}
