//! The tracker store: the single owner and writer of trackers, categories and
//! completion records.
//!
//! All access goes through one SQLite connection behind a mutex. Every
//! command runs in its own transaction (or a caller-defined [`Batch`]), so a
//! failed write leaves nothing behind. Once the transaction commits and the
//! lock is released, subscribed observers receive one [`ChangeSet`]
//! describing what changed.
//!
//! ```rust
//! use habitlog::libs::color::Color;
//! use habitlog::libs::config::Config;
//! use habitlog::libs::schedule::{Schedule, Weekday};
//! use habitlog::libs::store::TrackerStore;
//! use habitlog::libs::tracker::Tracker;
//! use chrono::NaiveDate;
//!
//! let store = TrackerStore::open_in_memory(&Config::default())?;
//! let run = Tracker::new("Run", Color::rgb(0xFD, 0x4C, 0x49), "🏃", Schedule::from([Weekday::Monday]));
//! store.create_tracker(&run, "Health")?;
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! store.mark_completed(run.id, monday)?;
//! assert_eq!(store.completion_count(run.id)?, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::config::Config;
use super::error::{StoreError, StoreResult};
use super::events::{ChangeKind, ChangeSet, EntityKind, Observer};
use super::messages::Message;
use super::query::{Sections, TrackerQuery};
use super::statistics::Statistics;
use super::tracker::{Category, CompletionRecord, Tracker, TrackerFilter};
use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::records::Records;
use crate::db::trackers::Trackers;
use crate::{msg_debug, msg_error_anyhow, msg_info};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Handle returned by [`TrackerStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

pub struct TrackerStore {
    db: Mutex<Db>,
    pinned_title: String,
    observers: Mutex<Observers>,
}

impl TrackerStore {
    /// Opens the store described by the on-disk configuration.
    pub fn open_default() -> anyhow::Result<Self> {
        let config = Config::read()?;
        Self::open(config.database_path()?, &config)
    }

    pub fn open<P: AsRef<Path>>(path: P, config: &Config) -> anyhow::Result<Self> {
        let db = Db::open(path.as_ref())?;
        msg_info!(Message::StoreOpened(path.as_ref().display().to_string()));
        Self::from_db(db, config)
    }

    pub fn open_in_memory(config: &Config) -> anyhow::Result<Self> {
        Self::from_db(Db::open_in_memory()?, config)
    }

    fn from_db(mut db: Db, config: &Config) -> anyhow::Result<Self> {
        let pinned_title = config.pinned_category.trim().to_string();
        if pinned_title.is_empty() {
            return Err(msg_error_anyhow!(Message::CategoryTitleEmpty));
        }

        let tx = db.conn.transaction()?;
        reserve_pinned_category(&tx, &pinned_title)?;
        tx.commit()?;

        Ok(Self {
            db: Mutex::new(db),
            pinned_title,
            observers: Mutex::new(Observers {
                next_id: 0,
                entries: Vec::new(),
            }),
        })
    }

    /// Title of the reserved category holding pinned trackers.
    pub fn pinned_title(&self) -> &str {
        &self.pinned_title
    }

    /// Registers a callback run after every committed change.
    ///
    /// Callbacks run on the writing thread, after the store lock has been
    /// released, so they may query the store.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&ChangeSet) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock();
        let id = SubscriptionId(observers.next_id);
        observers.next_id += 1;
        observers.entries.push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.lock().entries.retain(|(entry_id, _)| *entry_id != id);
    }

    // === COMMANDS ===

    /// Creates `tracker` in the category titled `category_title`, creating
    /// the category if needed. The tracker's own `main_category` is ignored.
    pub fn create_tracker(&self, tracker: &Tracker, category_title: &str) -> StoreResult<()> {
        self.write(|batch| batch.create_tracker(tracker, category_title))
    }

    /// Replaces name, colour, emoji and schedule of the tracker with
    /// `tracker.id`, moving it to `new_category` when that differs from
    /// `old_category`.
    pub fn edit_tracker(&self, tracker: &Tracker, old_category: Option<&str>, new_category: Option<&str>) -> StoreResult<()> {
        self.write(|batch| batch.edit_tracker(tracker, old_category, new_category))
    }

    /// Deletes a tracker and its completion records. Missing ids are ignored.
    pub fn delete_tracker(&self, id: Uuid) -> StoreResult<()> {
        self.write(|batch| batch.delete_tracker(id))
    }

    /// Deletes every tracker and completion record. Returns the tracker count.
    pub fn delete_all_trackers(&self) -> StoreResult<usize> {
        self.write(|batch| batch.delete_all_trackers())
    }

    /// Toggles the pin flag and returns the new value.
    pub fn set_pinned(&self, id: Uuid) -> StoreResult<bool> {
        self.write(|batch| batch.toggle_pinned(id))
    }

    pub fn mark_completed(&self, id: Uuid, date: NaiveDate) -> StoreResult<()> {
        self.write(|batch| batch.mark_completed(id, date).map(|_| ()))
    }

    pub fn unmark_completed(&self, id: Uuid, date: NaiveDate) -> StoreResult<()> {
        self.write(|batch| batch.unmark_completed(id, date).map(|_| ()))
    }

    /// Flips completion for `date` and returns whether it is now completed.
    pub fn toggle_completed(&self, id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        self.write(|batch| batch.toggle_completed(id, date))
    }

    pub fn create_category(&self, title: &str) -> StoreResult<()> {
        self.write(|batch| batch.create_category(title))
    }

    /// Runs several commands in one transaction with a single notification.
    ///
    /// If `f` fails, every command in the batch is rolled back.
    pub fn batch<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Batch<'_>) -> StoreResult<T>,
    {
        self.write(f)
    }

    // === QUERIES ===

    /// User-facing categories, ordered by title. The pinned sentinel is excluded.
    pub fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.read(|conn| Categories::new(conn).list_visible())
    }

    pub fn tracker(&self, id: Uuid) -> StoreResult<Option<Tracker>> {
        self.read(|conn| Trackers::new(conn).get_by_id(id))
    }

    pub fn trackers(&self, filter: TrackerFilter) -> StoreResult<Vec<Tracker>> {
        self.read(|conn| Trackers::new(conn).fetch(filter))
    }

    /// Home category of a tracker, whether or not it is pinned.
    pub fn category_title(&self, id: Uuid) -> StoreResult<Option<String>> {
        self.read(|conn| Ok(Categories::new(conn).get_by_tracker(&id.to_string())?.map(|category| category.title)))
    }

    /// Sectioned, filtered trackers for the main list.
    pub fn query_trackers(&self, query: &TrackerQuery) -> StoreResult<Sections> {
        let today = Local::now().date_naive();
        self.read(|conn| query.run(conn, &self.pinned_title, today))
    }

    pub fn completion_count(&self, id: Uuid) -> StoreResult<usize> {
        self.read(|conn| Records::new(conn).count_for_tracker(id))
    }

    pub fn is_completed(&self, id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        self.read(|conn| Records::new(conn).exists(id, date))
    }

    pub fn completed_on(&self, date: NaiveDate) -> StoreResult<HashSet<Uuid>> {
        self.read(|conn| Records::new(conn).completed_on(date))
    }

    /// All completion records ordered by tracker, then date.
    pub fn completion_records(&self) -> StoreResult<Vec<CompletionRecord>> {
        self.read(|conn| Records::new(conn).fetch_all())
    }

    pub fn statistics(&self) -> StoreResult<Statistics> {
        Ok(Statistics::from_records(&self.completion_records()?))
    }

    fn read<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let db = self.db.lock();
        Ok(f(&db.conn)?)
    }

    fn write<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Batch<'_>) -> StoreResult<T>,
    {
        let (value, changes) = {
            let mut db = self.db.lock();
            let tx = db.conn.transaction()?;
            let mut batch = Batch::new(&tx, &self.pinned_title);
            let value = match f(&mut batch) {
                Ok(value) => value,
                Err(e) => {
                    msg_debug!(Message::TransactionRolledBack(e.to_string()));
                    return Err(e);
                }
            };
            let changes = batch.into_changes();
            tx.commit()?;
            (value, changes)
        };

        self.notify(&changes);
        Ok(value)
    }

    fn notify(&self, changes: &ChangeSet) {
        if changes.is_empty() {
            return;
        }
        // Snapshot so observers can subscribe or unsubscribe while being called
        let observers: Vec<Observer> = self.observers.lock().entries.iter().map(|(_, observer)| observer.clone()).collect();
        for observer in observers {
            observer(changes);
        }
    }
}

/// Makes `title` the only reserved category.
///
/// A title that is already home to trackers cannot become the sentinel. A
/// previous sentinel is dropped when empty, otherwise it becomes an ordinary
/// category again.
fn reserve_pinned_category(conn: &Connection, title: &str) -> anyhow::Result<()> {
    let categories = Categories::new(conn);

    let id = match categories.get_by_title(title)? {
        Some(existing) if existing.is_reserved => existing.id,
        Some(existing) => {
            if categories.tracker_count(existing.id)? > 0 {
                return Err(msg_error_anyhow!(Message::PinnedTitleInUse(title.to_string())));
            }
            existing.id
        }
        None => {
            let id = categories.create(title)?;
            msg_info!(Message::PinnedCategoryCreated(title.to_string()));
            id
        }
    };

    for previous in categories.reserved()?.into_iter().filter(|previous| previous.id != id) {
        if categories.tracker_count(previous.id)? == 0 {
            categories.delete(previous.id)?;
        } else {
            categories.set_reserved(previous.id, false)?;
        }
        msg_info!(Message::PinnedCategoryReplaced(previous.title, title.to_string()));
    }
    categories.set_reserved(id, true)?;
    Ok(())
}

/// Commands executed inside one open transaction.
///
/// Obtained through [`TrackerStore::batch`]; every method has the same
/// semantics as the store command of the same name.
pub struct Batch<'a> {
    conn: &'a Connection,
    pinned_title: &'a str,
    changes: ChangeSet,
}

impl<'a> Batch<'a> {
    fn new(conn: &'a Connection, pinned_title: &'a str) -> Self {
        Self {
            conn,
            pinned_title,
            changes: ChangeSet::default(),
        }
    }

    fn into_changes(self) -> ChangeSet {
        self.changes
    }

    pub fn create_tracker(&mut self, tracker: &Tracker, category_title: &str) -> StoreResult<()> {
        validate_name(&tracker.name)?;
        let category_id = self.home_category(category_title)?;

        Trackers::new(self.conn).insert(tracker, category_id)?;
        self.changes.push(EntityKind::Tracker, ChangeKind::Inserted);
        msg_info!(Message::TrackerCreated(tracker.name.clone()));
        Ok(())
    }

    pub fn edit_tracker(&mut self, tracker: &Tracker, old_category: Option<&str>, new_category: Option<&str>) -> StoreResult<()> {
        validate_name(&tracker.name)?;
        let existing = Trackers::new(self.conn).get_by_id(tracker.id)?.ok_or(StoreError::NotFound(tracker.id))?;

        let category_id = match new_category {
            Some(new_title) if Some(new_title) != old_category => {
                let category_id = self.home_category(new_title)?;
                msg_info!(Message::TrackerMoved(tracker.name.clone(), existing.main_category.clone(), new_title.to_string()));
                category_id
            }
            _ => Categories::new(self.conn)
                .get_by_tracker(&tracker.id.to_string())?
                .map(|category| category.id)
                .ok_or(StoreError::NotFound(tracker.id))?,
        };

        Trackers::new(self.conn).update(tracker, category_id)?;
        self.changes.push(EntityKind::Tracker, ChangeKind::Updated);
        msg_info!(Message::TrackerUpdated(tracker.name.clone()));
        Ok(())
    }

    pub fn delete_tracker(&mut self, id: Uuid) -> StoreResult<()> {
        let removed_records = Records::new(self.conn).delete_for_tracker(id)?;
        if Trackers::new(self.conn).delete(id)? == 0 {
            return Ok(());
        }

        if removed_records > 0 {
            self.changes.push(EntityKind::CompletionRecord, ChangeKind::Deleted);
            msg_debug!(Message::CompletionRecordsDeleted(removed_records));
        }
        self.changes.push(EntityKind::Tracker, ChangeKind::Deleted);
        msg_info!(Message::TrackerDeleted(id));
        Ok(())
    }

    pub fn delete_all_trackers(&mut self) -> StoreResult<usize> {
        let removed_records = Records::new(self.conn).delete_all()?;
        let removed_trackers = Trackers::new(self.conn).delete_all()?;

        if removed_records > 0 {
            self.changes.push(EntityKind::CompletionRecord, ChangeKind::Deleted);
        }
        if removed_trackers > 0 {
            self.changes.push(EntityKind::Tracker, ChangeKind::Deleted);
        }
        msg_info!(Message::AllTrackersDeleted(removed_trackers));
        Ok(removed_trackers)
    }

    /// Pinning only flips the flag; the home category stays as it is.
    pub fn toggle_pinned(&mut self, id: Uuid) -> StoreResult<bool> {
        let tracker = self.existing(id)?;
        let pinned = !tracker.is_pinned;

        Trackers::new(self.conn).set_pinned(id, pinned)?;
        self.changes.push(EntityKind::Tracker, ChangeKind::Updated);
        if pinned {
            msg_info!(Message::TrackerPinned(tracker.name));
        } else {
            msg_info!(Message::TrackerUnpinned(tracker.name));
        }
        Ok(pinned)
    }

    /// Returns `true` when a record was added.
    pub fn mark_completed(&mut self, id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        self.existing(id)?;
        let inserted = Records::new(self.conn).insert(id, date)?;
        if inserted {
            self.changes.push(EntityKind::CompletionRecord, ChangeKind::Inserted);
            msg_debug!(Message::CompletionMarked(id, date.to_string()));
        }
        Ok(inserted)
    }

    /// Returns `true` when a record was removed.
    pub fn unmark_completed(&mut self, id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        self.existing(id)?;
        let deleted = Records::new(self.conn).delete(id, date)?;
        if deleted {
            self.changes.push(EntityKind::CompletionRecord, ChangeKind::Deleted);
            msg_debug!(Message::CompletionUnmarked(id, date.to_string()));
        }
        Ok(deleted)
    }

    pub fn toggle_completed(&mut self, id: Uuid, date: NaiveDate) -> StoreResult<bool> {
        if Records::new(self.conn).exists(id, date)? {
            self.unmark_completed(id, date)?;
            Ok(false)
        } else {
            self.mark_completed(id, date)?;
            Ok(true)
        }
    }

    /// Idempotent: an existing title, the pinned sentinel included, is a no-op.
    pub fn create_category(&mut self, title: &str) -> StoreResult<()> {
        let title = validate_title(title)?;
        let (_, created) = Categories::new(self.conn).get_or_create(title)?;
        if created {
            self.changes.push(EntityKind::Category, ChangeKind::Inserted);
            msg_info!(Message::CategoryCreated(title.to_string()));
        }
        Ok(())
    }

    /// Id of the category a tracker may call home, created on first use.
    fn home_category(&mut self, title: &str) -> StoreResult<i64> {
        let title = validate_title(title)?;
        if title == self.pinned_title {
            return Err(StoreError::Validation(Message::CategoryTitleReserved(title.to_string())));
        }

        let (category_id, created) = Categories::new(self.conn).get_or_create(title)?;
        if created {
            self.changes.push(EntityKind::Category, ChangeKind::Inserted);
            msg_info!(Message::CategoryCreated(title.to_string()));
        }
        Ok(category_id)
    }

    fn existing(&self, id: Uuid) -> StoreResult<Tracker> {
        Trackers::new(self.conn).get_by_id(id)?.ok_or(StoreError::NotFound(id))
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(Message::TrackerNameEmpty));
    }
    Ok(())
}

fn validate_title(title: &str) -> StoreResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::Validation(Message::CategoryTitleEmpty));
    }
    Ok(title)
}
