//! Aggregate figures over all completion records.

use super::tracker::CompletionRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Summary shown on the statistics screen.
///
/// Only `trackers_completed` is computed. The remaining metrics have no agreed
/// definition yet and stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    /// Total number of completion records.
    pub trackers_completed: usize,
    pub best_period: Option<u32>,
    pub ideal_days: Option<u32>,
    pub average_value: Option<f64>,
}

impl Statistics {
    pub fn from_records(records: &[CompletionRecord]) -> Self {
        let distinct: BTreeSet<&CompletionRecord> = records.iter().collect();
        Statistics {
            trackers_completed: distinct.len(),
            ..Default::default()
        }
    }

    /// Nothing has ever been completed.
    pub fn is_empty(&self) -> bool {
        self.trackers_completed == 0
    }
}

/// Completion dates per tracker, sorted and without duplicates.
pub fn records_by_tracker(records: &[CompletionRecord]) -> BTreeMap<Uuid, Vec<NaiveDate>> {
    let mut grouped: BTreeMap<Uuid, BTreeSet<NaiveDate>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.tracker_id).or_default().insert(record.date);
    }
    grouped.into_iter().map(|(id, dates)| (id, dates.into_iter().collect())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_record() {
        let run = Uuid::new_v4();
        let read = Uuid::new_v4();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = vec![
            CompletionRecord::new(run, monday),
            CompletionRecord::new(run, tuesday),
            CompletionRecord::new(read, monday),
        ];

        let stats = Statistics::from_records(&records);
        assert_eq!(stats.trackers_completed, 3);
        assert_eq!(stats.best_period, None);
        assert_eq!(stats.ideal_days, None);
        assert_eq!(stats.average_value, None);
        assert!(!stats.is_empty());

        let grouped = records_by_tracker(&records);
        assert_eq!(grouped[&run], vec![monday, tuesday]);
        assert_eq!(grouped[&read], vec![monday]);
    }

    #[test]
    fn empty_without_records() {
        assert!(Statistics::from_records(&[]).is_empty());
    }
}
