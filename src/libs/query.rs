//! Filtered, sectioned tracker listings.
//!
//! A [`TrackerQuery`] combines a reference date, an optional category, an
//! optional name fragment and a [`CompletionView`]. Evaluating it yields
//! [`Sections`]: pinned trackers first under the pinned title, then one
//! section per home category in title order, each sorted by tracker name.

use super::tracker::{Tracker, TrackerFilter};
use crate::db::records::Records;
use crate::db::trackers::Trackers;
use crate::msg_debug;
use crate::libs::messages::Message;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Which trackers to show relative to the day being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompletionView {
    /// Everything scheduled on the reference date.
    #[default]
    All,
    /// Everything scheduled today, whatever the reference date.
    DueToday,
    /// Trackers with a record on the reference date, scheduled or not.
    Completed,
    /// Trackers scheduled on the reference date without a record.
    NotCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerQuery {
    pub reference_date: NaiveDate,
    /// Effective category title; the pinned title selects pinned trackers.
    pub category: Option<String>,
    /// Case-insensitive name fragment.
    pub name: Option<String>,
    pub view: CompletionView,
}

impl TrackerQuery {
    pub fn new(reference_date: NaiveDate) -> Self {
        TrackerQuery {
            reference_date,
            category: None,
            name: None,
            view: CompletionView::All,
        }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_category(mut self, title: &str) -> Self {
        self.category = Some(title.to_string());
        self
    }

    pub fn with_name(mut self, fragment: &str) -> Self {
        self.name = Some(fragment.to_string());
        self
    }

    pub fn with_view(mut self, view: CompletionView) -> Self {
        self.view = view;
        self
    }

    /// The day schedules and completions are checked against.
    pub fn effective_date(&self, today: NaiveDate) -> NaiveDate {
        match self.view {
            CompletionView::DueToday => today,
            _ => self.reference_date,
        }
    }

    pub fn matches_name(&self, tracker: &Tracker) -> bool {
        match self.name.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(fragment) => tracker.name.to_lowercase().contains(&fragment.to_lowercase()),
        }
    }

    /// Whether `tracker` belongs in the result, given the completions on the
    /// effective date.
    pub fn matches(&self, tracker: &Tracker, date: NaiveDate, completed: &HashSet<Uuid>) -> bool {
        if !self.matches_name(tracker) {
            return false;
        }
        match self.view {
            CompletionView::All | CompletionView::DueToday => tracker.schedule.is_due_on(date),
            CompletionView::Completed => completed.contains(&tracker.id),
            CompletionView::NotCompleted => tracker.schedule.is_due_on(date) && !completed.contains(&tracker.id),
        }
    }

    /// Evaluates the query against one consistent read of the database.
    pub(crate) fn run(&self, conn: &Connection, pinned_title: &str, today: NaiveDate) -> rusqlite::Result<Sections> {
        let filter = match self.category.as_deref() {
            None => TrackerFilter::All,
            Some(title) if title == pinned_title => TrackerFilter::Pinned,
            Some(title) => TrackerFilter::InCategory(title.to_string()),
        };
        let trackers = Trackers::new(conn).fetch(filter)?;

        let date = self.effective_date(today);
        let completed = match self.view {
            CompletionView::Completed | CompletionView::NotCompleted => Records::new(conn).completed_on(date)?,
            CompletionView::All | CompletionView::DueToday => HashSet::new(),
        };

        let sections = Sections::group(trackers.into_iter().filter(|tracker| self.matches(tracker, date, &completed)), pinned_title);
        msg_debug!(Message::QueryRefreshed(sections.tracker_count()));
        Ok(sections)
    }
}

/// Trackers sharing one effective category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub trackers: Vec<Tracker>,
}

/// Ordered sections of a query result. Empty sections are never produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sections(Vec<Section>);

impl Sections {
    /// Groups trackers by effective category, keeping their incoming order
    /// within each section.
    pub fn group<I>(trackers: I, pinned_title: &str) -> Sections
    where
        I: IntoIterator<Item = Tracker>,
    {
        let mut pinned = Vec::new();
        let mut by_category: BTreeMap<String, Vec<Tracker>> = BTreeMap::new();
        for tracker in trackers {
            if tracker.is_pinned {
                pinned.push(tracker);
            } else {
                by_category.entry(tracker.main_category.clone()).or_default().push(tracker);
            }
        }

        let mut sections = Vec::with_capacity(by_category.len() + 1);
        if !pinned.is_empty() {
            sections.push(Section {
                title: pinned_title.to_string(),
                trackers: pinned,
            });
        }
        sections.extend(by_category.into_iter().map(|(title, trackers)| Section { title, trackers }));
        Sections(sections)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, section: usize) -> Option<&Section> {
        self.0.get(section)
    }

    pub fn tracker(&self, section: usize, row: usize) -> Option<&Tracker> {
        self.0.get(section)?.trackers.get(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(|section| section.title.as_str()).collect()
    }

    pub fn tracker_count(&self) -> usize {
        self.0.iter().map(|section| section.trackers.len()).sum()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.0.iter().any(|section| section.trackers.iter().any(|tracker| tracker.id == id))
    }

    pub fn into_vec(self) -> Vec<Section> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::color::Color;
    use crate::libs::schedule::{Schedule, Weekday};

    fn tracker(name: &str, category: &str, pinned: bool) -> Tracker {
        let mut tracker = Tracker::new(name, Color::default(), "⭐", Schedule::every_day());
        tracker.main_category = category.to_string();
        tracker.is_pinned = pinned;
        tracker
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pinned_section_comes_first() {
        let sections = Sections::group(
            vec![tracker("Read", "Study", false), tracker("Run", "Health", true), tracker("Swim", "Health", false)],
            "Pinned",
        );

        assert_eq!(sections.titles(), vec!["Pinned", "Health", "Study"]);
        assert_eq!(sections.tracker(0, 0).unwrap().name, "Run");
        assert_eq!(sections.tracker_count(), 3);
    }

    #[test]
    fn no_pinned_section_without_pinned_trackers() {
        let sections = Sections::group(vec![tracker("Read", "Study", false)], "Pinned");
        assert_eq!(sections.titles(), vec!["Study"]);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let query = TrackerQuery::new(date(2024, 1, 3)).with_name("RUN");
        assert!(query.matches_name(&tracker("Morning run", "Health", false)));
        assert!(!query.matches_name(&tracker("Swim", "Health", false)));

        let blank = TrackerQuery::new(date(2024, 1, 3)).with_name("  ");
        assert!(blank.matches_name(&tracker("Swim", "Health", false)));
    }

    #[test]
    fn completed_view_ignores_schedule() {
        let wednesday = date(2024, 1, 3);
        let mut monday_only = tracker("Run", "Health", false);
        monday_only.schedule = Schedule::from([Weekday::Monday]);
        let completed: HashSet<Uuid> = [monday_only.id].into_iter().collect();

        let all = TrackerQuery::new(wednesday);
        let done = TrackerQuery::new(wednesday).with_view(CompletionView::Completed);
        let pending = TrackerQuery::new(wednesday).with_view(CompletionView::NotCompleted);

        assert!(!all.matches(&monday_only, wednesday, &completed));
        assert!(done.matches(&monday_only, wednesday, &completed));
        assert!(!pending.matches(&monday_only, wednesday, &completed));
    }

    #[test]
    fn due_today_uses_today() {
        let query = TrackerQuery::new(date(2024, 1, 3)).with_view(CompletionView::DueToday);
        assert_eq!(query.effective_date(date(2024, 1, 8)), date(2024, 1, 8));
        assert_eq!(TrackerQuery::new(date(2024, 1, 3)).effective_date(date(2024, 1, 8)), date(2024, 1, 3));
    }
}
