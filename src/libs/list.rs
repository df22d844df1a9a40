//! Live, sectioned tracker list for a presentation layer.
//!
//! A [`TrackerList`] holds a [`TrackerQuery`] and its latest result. It
//! subscribes to the store and re-runs the query whenever trackers or
//! completion records change, then tells its own listeners. Category-only
//! changes do not trigger a refresh.

use super::error::{StoreError, StoreResult};
use super::messages::Message;
use super::query::{CompletionView, Section, Sections, TrackerQuery};
use super::store::{SubscriptionId, TrackerStore};
use super::tracker::Tracker;
use crate::msg_error;
use chrono::{Local, NaiveDate};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, OnceLock};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Display state of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerRow {
    pub tracker: Tracker,
    /// Completed on the day being viewed.
    pub completed: bool,
    /// Completions across all days.
    pub completion_count: usize,
    /// False for days after today.
    pub can_complete: bool,
}

pub struct TrackerList {
    store: Arc<TrackerStore>,
    query: RwLock<TrackerQuery>,
    sections: RwLock<Sections>,
    listeners: Mutex<Vec<Listener>>,
    subscription: OnceLock<SubscriptionId>,
    // Held from reading the query until the new sections are stored.
    refresh_lock: Mutex<()>,
}

impl TrackerList {
    /// Runs `query` once and keeps the result current until dropped.
    ///
    /// The subscription is in place before the first query runs, so no
    /// commit between the two is missed.
    pub fn new(store: Arc<TrackerStore>, query: TrackerQuery) -> StoreResult<Arc<Self>> {
        let list = Arc::new(TrackerList {
            store: store.clone(),
            query: RwLock::new(query),
            sections: RwLock::new(Sections::default()),
            listeners: Mutex::new(Vec::new()),
            subscription: OnceLock::new(),
            refresh_lock: Mutex::new(()),
        });

        let weak = Arc::downgrade(&list);
        let id = store.subscribe(move |changes| {
            if !changes.affects_tracker_list() {
                return;
            }
            if let Some(list) = weak.upgrade() {
                if let Err(e) = list.refresh() {
                    msg_error!(Message::QueryRefreshFailed(e.to_string()));
                }
            }
        });
        let _ = list.subscription.set(id);

        list.refresh()?;
        Ok(list)
    }

    pub fn store(&self) -> &Arc<TrackerStore> {
        &self.store
    }

    pub fn query(&self) -> TrackerQuery {
        self.query.read().clone()
    }

    /// Registers a callback run after every refresh.
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }

    // === SECTIONED ACCESS ===

    pub fn number_of_sections(&self) -> usize {
        self.sections.read().len()
    }

    pub fn number_of_rows(&self, section: usize) -> usize {
        self.sections.read().get(section).map_or(0, |section| section.trackers.len())
    }

    pub fn title(&self, section: usize) -> Option<String> {
        self.sections.read().get(section).map(|section| section.title.clone())
    }

    pub fn tracker(&self, section: usize, row: usize) -> Option<Tracker> {
        self.sections.read().tracker(section, row).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.read().is_empty()
    }

    pub fn sections(&self) -> Vec<Section> {
        self.sections.read().clone().into_vec()
    }

    /// Row state for the day being viewed, read fresh from the store.
    pub fn row(&self, section: usize, row: usize) -> StoreResult<Option<TrackerRow>> {
        let Some(tracker) = self.tracker(section, row) else {
            return Ok(None);
        };
        let today = Local::now().date_naive();
        let date = self.viewed_date(today);

        Ok(Some(TrackerRow {
            completed: self.store.is_completed(tracker.id, date)?,
            completion_count: self.store.completion_count(tracker.id)?,
            can_complete: date <= today,
            tracker,
        }))
    }

    /// Flips completion of a row for the day being viewed.
    ///
    /// Days after today cannot be completed.
    pub fn toggle_row(&self, section: usize, row: usize) -> StoreResult<bool> {
        let today = Local::now().date_naive();
        let date = self.viewed_date(today);
        if date > today {
            return Err(StoreError::Validation(Message::FutureDateCompletion(date.to_string())));
        }

        match self.tracker(section, row) {
            Some(tracker) => self.store.toggle_completed(tracker.id, date),
            None => Ok(false),
        }
    }

    // === FILTERS ===

    pub fn set_reference_date(&self, date: NaiveDate) -> StoreResult<()> {
        self.update_query(|query| query.reference_date = date)
    }

    pub fn set_category(&self, title: Option<&str>) -> StoreResult<()> {
        self.update_query(|query| query.category = title.map(str::to_string))
    }

    pub fn set_name_filter(&self, fragment: Option<&str>) -> StoreResult<()> {
        self.update_query(|query| query.name = fragment.map(str::to_string))
    }

    pub fn set_view(&self, view: CompletionView) -> StoreResult<()> {
        self.update_query(|query| query.view = view)
    }

    pub fn set_query(&self, query: TrackerQuery) -> StoreResult<()> {
        self.update_query(|current| *current = query)
    }

    /// Re-runs the current query and notifies listeners.
    ///
    /// Concurrent refreshes are serialized, so the stored sections always
    /// come from the latest query against the latest commit.
    pub fn refresh(&self) -> StoreResult<()> {
        {
            let _guard = self.refresh_lock.lock();
            let query = self.query();
            let sections = self.store.query_trackers(&query)?;
            *self.sections.write() = sections;
        }

        let listeners: Vec<Listener> = self.listeners.lock().clone();
        for listener in listeners {
            listener();
        }
        Ok(())
    }

    fn update_query<F>(&self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut TrackerQuery),
    {
        f(&mut *self.query.write());
        self.refresh()
    }

    fn viewed_date(&self, today: NaiveDate) -> NaiveDate {
        self.query.read().effective_date(today)
    }
}

impl Drop for TrackerList {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.get() {
            self.store.unsubscribe(*id);
        }
    }
}
