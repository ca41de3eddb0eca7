// src/services/set_service_tests.rs
//
// UNIT TESTS: Set Service
//
// INVARIANTS TESTED:
// - A missing set file is bootstrapped from the source; a source
//   without usable sets is an error, not an empty catalogue
// - Online-only releases are dropped and sets are stored in release order
// - A refresh without news writes nothing (file bytes unchanged)
// - A refresh with a newer latest set rebuilds the whole collection
// - An unreachable source during refresh leaves local data intact

#[cfg(test)]
mod set_service_tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    use crate::domain::CardSet;
    use crate::error::AppError;
    use crate::events::{EventBus, SetCollectionRebuilt, SetUpdated};
    use crate::integrations::{MockSetSource, SourceSet};
    use crate::repositories::{FileSetRepository, SetRepository};
    use crate::services::{RefreshOutcome, SetService};

    fn source_set(code: &str, date: (i32, u32, u32), online_only: bool) -> SourceSet {
        SourceSet {
            name: format!("Set {}", code),
            code: code.to_string(),
            release_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            online_only,
        }
    }

    fn source_returning(sets: Vec<SourceSet>) -> MockSetSource {
        let mut source = MockSetSource::new();
        source
            .expect_fetch_sets()
            .returning(move || Ok(sets.clone()));
        source
    }

    fn unreachable_source() -> MockSetSource {
        let mut source = MockSetSource::new();
        source
            .expect_fetch_sets()
            .returning(|| Err(AppError::External("connection refused".to_string())));
        source
    }

    struct Fixture {
        dir: TempDir,
        bus: Arc<EventBus>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempdir().unwrap(),
                bus: Arc::new(EventBus::new()),
            }
        }

        fn data_file(&self) -> PathBuf {
            self.dir.path().join("setdata")
        }

        fn service(&self, source: MockSetSource) -> SetService {
            let repo = FileSetRepository::open(self.data_file()).unwrap();
            SetService::new(Arc::new(repo), Arc::new(source), Arc::clone(&self.bus))
        }
    }

    fn codes(sets: &[CardSet]) -> Vec<String> {
        sets.iter().map(|s| s.code.clone()).collect()
    }

    #[tokio::test]
    async fn test_bootstrap_then_refresh_with_new_latest_set() {
        let fx = Fixture::new();

        let service = fx.service(source_returning(vec![
            source_set("A", (2020, 1, 1), false),
            source_set("B", (2021, 1, 1), false),
        ]));
        service.initialize().await.unwrap();
        assert_eq!(service.latest_set().unwrap().code, "B");
        drop(service);

        let service = fx.service(source_returning(vec![
            source_set("A", (2020, 1, 1), false),
            source_set("B", (2021, 1, 1), false),
            source_set("C", (2022, 1, 1), false),
        ]));
        service.initialize().await.unwrap();

        let outcome = service.update_from_source().await.unwrap();

        assert!(outcome.was_replaced());
        assert_eq!(outcome.latest().code, "C");
        assert_eq!(codes(&service.list_sets()), vec!["A", "B", "C"]);

        let reloaded = FileSetRepository::open(fx.data_file()).unwrap();
        assert_eq!(reloaded.latest().unwrap().code, "C");
        assert_eq!(reloaded.len(), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_filters_online_only_and_sorts() {
        let fx = Fixture::new();
        let rebuilt = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&rebuilt);
        fx.bus.subscribe::<SetCollectionRebuilt, _>(move |event| {
            counter.store(event.set_count, Ordering::SeqCst);
        });

        let service = fx.service(source_returning(vec![
            source_set("M21", (2020, 7, 3), false),
            source_set("PRM", (2002, 6, 24), true),
            source_set("LEA", (1993, 8, 5), false),
            source_set("ISD", (2011, 9, 30), false),
        ]));

        service.initialize().await.unwrap();

        assert_eq!(codes(&service.list_sets()), vec!["LEA", "ISD", "M21"]);
        assert!(service.get_set("PRM").is_none());
        assert_eq!(rebuilt.load(Ordering::SeqCst), 3);
        assert!(fx.data_file().exists());
    }

    #[tokio::test]
    async fn test_initialize_with_existing_file_skips_source() {
        let fx = Fixture::new();
        fx.service(source_returning(vec![source_set("A", (2020, 1, 1), false)]))
            .initialize()
            .await
            .unwrap();

        let mut untouched = MockSetSource::new();
        untouched.expect_fetch_sets().never();
        let service = fx.service(untouched);

        service.initialize().await.unwrap();
        assert_eq!(codes(&service.list_sets()), vec!["A"]);
    }

    #[tokio::test]
    async fn test_bootstrap_fails_when_source_unreachable() {
        let fx = Fixture::new();
        let service = fx.service(unreachable_source());

        let result = service.initialize().await;

        assert!(matches!(result, Err(AppError::External(_))));
        assert!(!fx.data_file().exists());
    }

    #[tokio::test]
    async fn test_bootstrap_without_usable_sets_fails_and_stores_nothing() {
        let fx = Fixture::new();
        let service = fx.service(source_returning(vec![source_set("PRM", (2002, 6, 24), true)]));

        let result = service.initialize().await;

        assert!(matches!(result, Err(AppError::External(_))));
        assert!(!fx.data_file().exists());
        assert!(FileSetRepository::open(fx.data_file()).unwrap().needs_bootstrap());
    }

    #[tokio::test]
    async fn test_refresh_up_to_date_leaves_file_byte_identical() {
        let fx = Fixture::new();
        let sets = vec![
            source_set("A", (2020, 1, 1), false),
            source_set("B", (2021, 1, 1), false),
        ];
        let service = fx.service(source_returning(sets));
        service.initialize().await.unwrap();
        let before = fs::read(fx.data_file()).unwrap();

        let first = service.update_from_source().await.unwrap();
        let second = service.update_from_source().await.unwrap();

        assert!(matches!(first, RefreshOutcome::UpToDate { .. }));
        assert_eq!(first, second);
        assert_eq!(fs::read(fx.data_file()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_refresh_with_unreachable_source_keeps_sets() {
        let fx = Fixture::new();
        fx.service(source_returning(vec![
            source_set("A", (2020, 1, 1), false),
            source_set("B", (2021, 1, 1), false),
        ]))
        .initialize()
        .await
        .unwrap();
        let before = fs::read(fx.data_file()).unwrap();

        let service = fx.service(unreachable_source());
        service.initialize().await.unwrap();
        let result = service.update_from_source().await;

        assert!(matches!(result, Err(AppError::External(_))));
        assert_eq!(codes(&service.list_sets()), vec!["A", "B"]);
        assert_eq!(fs::read(fx.data_file()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_latest_comparison_ignores_online_only_sets() {
        let fx = Fixture::new();
        let service = fx.service(source_returning(vec![
            source_set("A", (2020, 1, 1), false),
            source_set("MTGO", (2023, 1, 1), true),
        ]));
        service.initialize().await.unwrap();

        let outcome = service.update_from_source().await.unwrap();

        assert!(!outcome.was_replaced());
        assert_eq!(outcome.latest().code, "A");
    }

    #[tokio::test]
    async fn test_update_set_emits_event() {
        let fx = Fixture::new();
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);
        fx.bus.subscribe::<SetUpdated, _>(move |event| {
            *sink.lock().unwrap() = Some((event.previous_code.clone(), event.set.name.clone()));
        });
        let service = fx.service(source_returning(vec![source_set("A", (2020, 1, 1), false)]));
        service.initialize().await.unwrap();

        let renamed = CardSet::new("Alpha Renamed", "A", NaiveDate::from_ymd_opt(2020, 1, 1));
        service.update_set("A", renamed).unwrap();

        assert_eq!(service.get_set("A").unwrap().name, "Alpha Renamed");
        assert_eq!(
            *seen.lock().unwrap(),
            Some(("A".to_string(), "Alpha Renamed".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_unknown_set_fails() {
        let fx = Fixture::new();
        let service = fx.service(source_returning(vec![source_set("A", (2020, 1, 1), false)]));
        service.initialize().await.unwrap();

        let result = service.update_set("ZZZ", CardSet::new("Nope", "ZZZ", None));

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
