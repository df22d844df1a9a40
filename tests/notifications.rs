#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use habitlog::libs::color::Color;
    use habitlog::libs::config::Config;
    use habitlog::libs::error::StoreError;
    use habitlog::libs::events::{Change, ChangeKind, ChangeSet, EntityKind};
    use habitlog::libs::schedule::Schedule;
    use habitlog::libs::store::TrackerStore;
    use habitlog::libs::tracker::{Tracker, TrackerFilter};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use uuid::Uuid;

    struct NotificationTestContext {
        _temp_dir: TempDir,
        store: Arc<TrackerStore>,
        received: Arc<Mutex<Vec<ChangeSet>>>,
    }

    impl TestContext for NotificationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = Arc::new(TrackerStore::open(temp_dir.path().join("habitlog.db"), &Config::default()).unwrap());
            let received = Arc::new(Mutex::new(Vec::new()));
            let sink = received.clone();
            store.subscribe(move |changes| sink.lock().push(changes.clone()));
            NotificationTestContext {
                _temp_dir: temp_dir,
                store,
                received,
            }
        }
    }

    impl NotificationTestContext {
        fn take(&self) -> Vec<ChangeSet> {
            std::mem::take(&mut *self.received.lock())
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn daily(name: &str) -> Tracker {
        Tracker::new(name, Color::default(), "⭐", Schedule::every_day())
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_create_emits_one_change_set(ctx: &mut NotificationTestContext) {
        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();

        let received = ctx.take();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0].changes(),
            &[
                Change::new(EntityKind::Category, ChangeKind::Inserted),
                Change::new(EntityKind::Tracker, ChangeKind::Inserted),
            ]
        );
        assert!(received[0].affects_tracker_list());
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_noops_are_silent(ctx: &mut NotificationTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        ctx.store.mark_completed(run.id, monday()).unwrap();
        ctx.take();

        ctx.store.mark_completed(run.id, monday()).unwrap();
        ctx.store.unmark_completed(run.id, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).unwrap();
        ctx.store.create_category("Health").unwrap();
        ctx.store.delete_tracker(Uuid::new_v4()).unwrap();

        assert!(ctx.take().is_empty());
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_failed_write_is_silent(ctx: &mut NotificationTestContext) {
        let err = ctx.store.create_tracker(&daily(""), "Health").unwrap_err();
        assert!(err.is_validation());

        assert!(ctx.take().is_empty());
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_category_only_change(ctx: &mut NotificationTestContext) {
        ctx.store.create_category("Work").unwrap();

        let received = ctx.take();
        assert_eq!(received.len(), 1);
        assert!(received[0].touches(EntityKind::Category));
        assert!(!received[0].affects_tracker_list());
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_delete_reports_records(ctx: &mut NotificationTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        ctx.store.mark_completed(run.id, monday()).unwrap();
        ctx.take();

        ctx.store.delete_tracker(run.id).unwrap();

        let received = ctx.take();
        assert_eq!(received.len(), 1);
        assert!(received[0].touches(EntityKind::CompletionRecord));
        assert!(received[0].touches(EntityKind::Tracker));
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_batch_notifies_once(ctx: &mut NotificationTestContext) {
        let run = daily("Run");
        let read = daily("Read");

        ctx.store
            .batch(|batch| {
                batch.create_tracker(&run, "Health")?;
                batch.create_tracker(&read, "Study")?;
                batch.mark_completed(run.id, monday())?;
                Ok(())
            })
            .unwrap();

        let received = ctx.take();
        assert_eq!(received.len(), 1);
        assert!(received[0].touches(EntityKind::CompletionRecord));
        assert_eq!(ctx.store.trackers(TrackerFilter::All).unwrap().len(), 2);
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_failed_batch_rolls_back(ctx: &mut NotificationTestContext) {
        let run = daily("Run");

        let err = ctx
            .store
            .batch(|batch| {
                batch.create_tracker(&run, "Health")?;
                batch.mark_completed(Uuid::new_v4(), monday())?;
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(ctx.store.tracker(run.id).unwrap().is_none());
        assert!(ctx.store.list_categories().unwrap().is_empty());
        assert!(ctx.take().is_empty());
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_observer_can_read_store(ctx: &mut NotificationTestContext) {
        let counts = Arc::new(Mutex::new(Vec::new()));
        let seen = counts.clone();
        let store = Arc::downgrade(&ctx.store);
        ctx.store.subscribe(move |_| {
            if let Some(store) = store.upgrade() {
                seen.lock().push(store.trackers(TrackerFilter::All).unwrap().len());
            }
        });

        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();
        ctx.store.create_tracker(&daily("Swim"), "Health").unwrap();

        assert_eq!(*counts.lock(), vec![1, 2]);
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_unsubscribe(ctx: &mut NotificationTestContext) {
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let id = ctx.store.subscribe(move |_| *counter.lock() += 1);

        ctx.store.create_category("Work").unwrap();
        ctx.store.unsubscribe(id);
        ctx.store.create_category("Home").unwrap();

        assert_eq!(*hits.lock(), 1);
    }

    #[test_context(NotificationTestContext)]
    #[test]
    fn test_concurrent_writers(ctx: &mut NotificationTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        ctx.take();

        let handles: Vec<_> = (1..=8)
            .map(|day| {
                let store = ctx.store.clone();
                let id = run.id;
                thread::spawn(move || store.mark_completed(id, NaiveDate::from_ymd_opt(2024, 1, day).unwrap()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(ctx.store.completion_count(run.id).unwrap(), 8);
        assert_eq!(ctx.take().len(), 8);
    }
}
