use super::parse_id;
use crate::libs::tracker::CompletionRecord;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result};
use std::collections::HashSet;
use uuid::Uuid;

// The (tracker_id, date) primary key makes a second insert for the same day a no-op
const INSERT_RECORD: &str = "INSERT OR IGNORE INTO completion_records (tracker_id, date) VALUES (?1, ?2)";
const DELETE_RECORD: &str = "DELETE FROM completion_records WHERE tracker_id = ?1 AND date = ?2";
const DELETE_TRACKER_RECORDS: &str = "DELETE FROM completion_records WHERE tracker_id = ?1";
const DELETE_ALL_RECORDS: &str = "DELETE FROM completion_records";
const COUNT_TRACKER_RECORDS: &str = "SELECT COUNT(*) FROM completion_records WHERE tracker_id = ?1";
const EXISTS_RECORD: &str = "SELECT EXISTS(SELECT 1 FROM completion_records WHERE tracker_id = ?1 AND date = ?2)";
const SELECT_COMPLETED_ON: &str = "SELECT tracker_id FROM completion_records WHERE date = ?1";
const SELECT_ALL_RECORDS: &str = "SELECT tracker_id, date FROM completion_records ORDER BY tracker_id, date";

/// Completion record rows, over any connection or open transaction.
pub struct Records<'c> {
    conn: &'c Connection,
}

impl<'c> Records<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Returns `true` when a new record was written.
    pub fn insert(&self, tracker_id: Uuid, date: NaiveDate) -> Result<bool> {
        Ok(self.conn.execute(INSERT_RECORD, params![tracker_id.to_string(), date])? > 0)
    }

    /// Returns `true` when a record was removed.
    pub fn delete(&self, tracker_id: Uuid, date: NaiveDate) -> Result<bool> {
        Ok(self.conn.execute(DELETE_RECORD, params![tracker_id.to_string(), date])? > 0)
    }

    pub fn delete_for_tracker(&self, tracker_id: Uuid) -> Result<usize> {
        self.conn.execute(DELETE_TRACKER_RECORDS, params![tracker_id.to_string()])
    }

    pub fn delete_all(&self) -> Result<usize> {
        self.conn.execute(DELETE_ALL_RECORDS, [])
    }

    pub fn count_for_tracker(&self, tracker_id: Uuid) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_TRACKER_RECORDS, params![tracker_id.to_string()], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn exists(&self, tracker_id: Uuid, date: NaiveDate) -> Result<bool> {
        self.conn.query_row(EXISTS_RECORD, params![tracker_id.to_string(), date], |row| row.get(0))
    }

    /// Ids of every tracker completed on `date`.
    pub fn completed_on(&self, date: NaiveDate) -> Result<HashSet<Uuid>> {
        let mut stmt = self.conn.prepare(SELECT_COMPLETED_ON)?;
        let id_iter = stmt.query_map(params![date], |row| parse_id(row, 0))?;

        let mut ids = HashSet::new();
        for id in id_iter {
            ids.insert(id?);
        }
        Ok(ids)
    }

    /// Every record, grouped by tracker and ordered by date.
    pub fn fetch_all(&self) -> Result<Vec<CompletionRecord>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_RECORDS)?;
        let record_iter = stmt.query_map([], |row| {
            Ok(CompletionRecord {
                tracker_id: parse_id(row, 0)?,
                date: row.get(1)?,
            })
        })?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }
}
