use super::color::Color;
use super::schedule::Schedule;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A habit (non-empty schedule) or one-off event (empty schedule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: Uuid,
    pub name: String,
    pub color: Color,
    pub emoji: String,
    pub schedule: Schedule,
    pub is_pinned: bool,
    /// Home category, kept while the tracker is pinned.
    pub main_category: String,
}

impl Tracker {
    pub fn new(name: &str, color: Color, emoji: &str, schedule: Schedule) -> Self {
        Tracker {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color,
            emoji: emoji.to_string(),
            schedule,
            is_pinned: false,
            main_category: String::new(),
        }
    }

    /// A tracker with an empty schedule.
    pub fn event(name: &str, color: Color, emoji: &str) -> Self {
        Self::new(name, color, emoji, Schedule::event())
    }

    pub fn is_event(&self) -> bool {
        self.schedule.is_event()
    }

    /// Category the tracker is listed under: the pinned sentinel while pinned,
    /// its home category otherwise.
    pub fn effective_category<'a>(&'a self, pinned_title: &'a str) -> &'a str {
        if self.is_pinned {
            pinned_title
        } else {
            &self.main_category
        }
    }
}

/// A named grouping of trackers. The title is the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
}

/// One tracker completed on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub tracker_id: Uuid,
    pub date: NaiveDate,
}

impl CompletionRecord {
    pub fn new(tracker_id: Uuid, date: NaiveDate) -> Self {
        CompletionRecord { tracker_id, date }
    }
}

/// Drops the time of day; completions are compared by calendar day.
pub fn normalize_date(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Row selection for the trackers table.
#[derive(Debug, Clone)]
pub enum TrackerFilter {
    All,
    Pinned,
    /// Unpinned trackers whose home category has this title.
    InCategory(String),
}
