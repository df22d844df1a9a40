//! Weekday schedules and their storage encoding.
//!
//! A [`Schedule`] is a set of [`Weekday`]s. It is persisted as the
//! comma-separated integer codes of its members (`"0,2,4"` for Monday,
//! Wednesday and Friday). An empty schedule encodes to an empty string and
//! marks a one-off event rather than a recurring habit.
//!
//! Decoding never fails: tokens that are not a valid weekday code are
//! dropped, so corrupt rows still load.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const SEPARATOR: &str = ",";

/// Day of the week, numbered Monday = 0 through Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: i64) -> Option<Weekday> {
        usize::try_from(code).ok().and_then(|index| Self::ALL.get(index).copied())
    }

    /// Weekday of a calendar date, with Monday as the first day regardless of locale.
    pub fn of(date: NaiveDate) -> Weekday {
        date.weekday().into()
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// The set of weekdays a tracker recurs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule(BTreeSet<Weekday>);

impl Schedule {
    /// Empty schedule, i.e. a one-off event.
    pub fn event() -> Self {
        Self::default()
    }

    pub fn every_day() -> Self {
        Weekday::ALL.into_iter().collect()
    }

    pub fn is_event(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn insert(&mut self, day: Weekday) -> bool {
        self.0.insert(day)
    }

    pub fn remove(&mut self, day: Weekday) -> bool {
        self.0.remove(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when a tracker with this schedule is due on `date`.
    ///
    /// Events (empty schedules) are due every day.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.is_event() || self.contains(Weekday::of(date))
    }

    pub fn encode(&self) -> String {
        self.0.iter().map(|day| day.code().to_string()).collect::<Vec<_>>().join(SEPARATOR)
    }

    pub fn decode(text: &str) -> Schedule {
        text.split(SEPARATOR)
            .filter_map(|token| token.trim().parse::<i64>().ok())
            .filter_map(Weekday::from_code)
            .collect()
    }
}

impl FromIterator<Weekday> for Schedule {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Schedule(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Weekday; N]> for Schedule {
    fn from(days: [Weekday; N]) -> Self {
        days.into_iter().collect()
    }
}
