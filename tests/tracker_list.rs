#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use habitlog::libs::color::Color;
    use habitlog::libs::config::Config;
    use habitlog::libs::list::TrackerList;
    use habitlog::libs::query::{CompletionView, TrackerQuery};
    use habitlog::libs::schedule::{Schedule, Weekday};
    use habitlog::libs::store::TrackerStore;
    use habitlog::libs::tracker::Tracker;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ListTestContext {
        _temp_dir: TempDir,
        store: Arc<TrackerStore>,
    }

    impl TestContext for ListTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = TrackerStore::open(temp_dir.path().join("habitlog.db"), &Config::default()).unwrap();
            ListTestContext {
                _temp_dir: temp_dir,
                store: Arc::new(store),
            }
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn daily(name: &str) -> Tracker {
        Tracker::new(name, Color::default(), "⭐", Schedule::every_day())
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_sectioned_access(ctx: &mut ListTestContext) {
        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();
        ctx.store.create_tracker(&daily("Swim"), "Health").unwrap();
        ctx.store.create_tracker(&daily("Read"), "Study").unwrap();

        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();

        assert_eq!(list.number_of_sections(), 2);
        assert_eq!(list.number_of_rows(0), 2);
        assert_eq!(list.number_of_rows(1), 1);
        assert_eq!(list.number_of_rows(5), 0);
        assert_eq!(list.title(0).as_deref(), Some("Health"));
        assert_eq!(list.tracker(1, 0).unwrap().name, "Read");
        assert!(list.tracker(1, 1).is_none());
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_list_follows_store_changes(ctx: &mut ListTestContext) {
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();
        assert!(list.is_empty());

        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        assert_eq!(list.number_of_sections(), 1);

        ctx.store.delete_tracker(run.id).unwrap();
        assert!(list.is_empty());
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_category_only_change_does_not_refresh(ctx: &mut ListTestContext) {
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = refreshes.clone();
        list.on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        ctx.store.create_category("Health").unwrap();
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);

        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_category_move_is_one_transition(ctx: &mut ListTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();

        let observed = Arc::new(Mutex::new(Vec::new()));
        let seen = observed.clone();
        let watched = Arc::downgrade(&list);
        list.on_change(move || {
            if let Some(list) = watched.upgrade() {
                let titles: Vec<String> = list.sections().into_iter().map(|section| section.title).collect();
                seen.lock().push(titles);
            }
        });

        ctx.store.edit_tracker(&run, Some("Health"), Some("Sport")).unwrap();

        assert_eq!(*observed.lock(), vec![vec!["Sport".to_string()]]);
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_filters_refresh_list(ctx: &mut ListTestContext) {
        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();
        ctx.store.create_tracker(&daily("Read"), "Study").unwrap();
        let yoga = Tracker::new("Yoga", Color::default(), "🧘", Schedule::from([Weekday::Wednesday]));
        ctx.store.create_tracker(&yoga, "Health").unwrap();
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();

        list.set_category(Some("Study")).unwrap();
        assert_eq!(list.title(0).as_deref(), Some("Study"));

        list.set_category(None).unwrap();
        list.set_name_filter(Some("ru")).unwrap();
        assert_eq!(list.number_of_sections(), 1);
        assert_eq!(list.tracker(0, 0).unwrap().name, "Run");

        list.set_name_filter(None).unwrap();
        list.set_reference_date(monday() + Duration::days(2)).unwrap();
        assert_eq!(list.number_of_rows(0), 2);

        ctx.store.mark_completed(yoga.id, monday() + Duration::days(2)).unwrap();
        list.set_view(CompletionView::Completed).unwrap();
        assert_eq!(list.tracker(0, 0).unwrap().name, "Yoga");
        assert_eq!(list.query().view, CompletionView::Completed);
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_row_state_and_toggle(ctx: &mut ListTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        ctx.store.mark_completed(run.id, monday()).unwrap();
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();

        let row = list.row(0, 0).unwrap().unwrap();
        assert!(row.completed);
        assert_eq!(row.completion_count, 1);
        assert!(row.can_complete);

        assert!(!list.toggle_row(0, 0).unwrap());
        let row = list.row(0, 0).unwrap().unwrap();
        assert!(!row.completed);
        assert_eq!(row.completion_count, 0);
        assert!(list.row(3, 0).unwrap().is_none());
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_future_dates_cannot_be_completed(ctx: &mut ListTestContext) {
        let run = daily("Run");
        ctx.store.create_tracker(&run, "Health").unwrap();
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(tomorrow)).unwrap();

        assert!(!list.row(0, 0).unwrap().unwrap().can_complete);
        assert!(list.toggle_row(0, 0).unwrap_err().is_validation());
        assert_eq!(ctx.store.completion_count(run.id).unwrap(), 0);
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_dropped_list_stops_listening(ctx: &mut ListTestContext) {
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = refreshes.clone();
        list.on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(list);

        ctx.store.create_tracker(&daily("Run"), "Health").unwrap();
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[test_context(ListTestContext)]
    #[test]
    fn test_list_settles_on_latest_state(ctx: &mut ListTestContext) {
        let seed = daily("Seed");
        ctx.store.create_tracker(&seed, "Health").unwrap();
        let list = TrackerList::new(ctx.store.clone(), TrackerQuery::new(monday())).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|n| {
                let store = ctx.store.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        let tracker = daily(&format!("Habit {}-{}", n, i));
                        store.create_tracker(&tracker, if i % 2 == 0 { "Health" } else { "Study" }).unwrap();
                        if i % 3 == 0 {
                            store.mark_completed(tracker.id, monday()).unwrap();
                        }
                    }
                })
            })
            .collect();
        let toggler = {
            let list = list.clone();
            thread::spawn(move || {
                for i in 0..20 {
                    let view = if i % 2 == 0 { CompletionView::Completed } else { CompletionView::All };
                    list.set_view(view).unwrap();
                    list.set_category(if i % 3 == 0 { Some("Study") } else { None }).unwrap();
                }
            })
        };
        let late = {
            let store = ctx.store.clone();
            thread::spawn(move || TrackerList::new(store, TrackerQuery::new(monday())).unwrap())
        };

        for writer in writers {
            writer.join().unwrap();
        }
        toggler.join().unwrap();
        let late = late.join().unwrap();

        let expected = ctx.store.query_trackers(&list.query()).unwrap().into_vec();
        assert_eq!(list.sections(), expected);
        let expected = ctx.store.query_trackers(&late.query()).unwrap().into_vec();
        assert_eq!(late.sections(), expected);
        assert_eq!(late.number_of_rows(0) + late.number_of_rows(1), 41);
    }
}
