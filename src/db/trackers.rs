use super::parse_id;
use crate::libs::color::Color;
use crate::libs::schedule::Schedule;
use crate::libs::tracker::{Tracker, TrackerFilter};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Result, Row};
use uuid::Uuid;

const INSERT_TRACKER: &str = "INSERT INTO trackers (id, name, color, emoji, schedule, is_pinned, category_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TRACKER: &str = "UPDATE trackers SET name = ?2, color = ?3, emoji = ?4, schedule = ?5, category_id = ?6 WHERE id = ?1";
const UPDATE_PINNED: &str = "UPDATE trackers SET is_pinned = ?2 WHERE id = ?1";
const DELETE_TRACKER: &str = "DELETE FROM trackers WHERE id = ?1";
const DELETE_ALL_TRACKERS: &str = "DELETE FROM trackers";
const SELECT_TRACKERS: &str = "
    SELECT t.id, t.name, t.color, t.emoji, t.schedule, t.is_pinned, c.title
    FROM trackers t
    JOIN categories c ON c.id = t.category_id";
const WHERE_ID: &str = "WHERE t.id = ?1";
const WHERE_PINNED: &str = "WHERE t.is_pinned = 1";
const WHERE_CATEGORY: &str = "WHERE t.is_pinned = 0 AND c.title = ?";
const ORDER_BY_NAME: &str = "ORDER BY t.name, t.id";

/// Tracker rows, over any connection or open transaction.
pub struct Trackers<'c> {
    conn: &'c Connection,
}

impl<'c> Trackers<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, tracker: &Tracker, category_id: i64) -> Result<()> {
        self.conn.execute(
            INSERT_TRACKER,
            params![
                tracker.id.to_string(),
                tracker.name,
                tracker.color.to_hex(),
                tracker.emoji,
                tracker.schedule.encode(),
                tracker.is_pinned,
                category_id
            ],
        )?;

        Ok(())
    }

    /// Rewrites the editable fields. Returns the number of rows touched.
    pub fn update(&self, tracker: &Tracker, category_id: i64) -> Result<usize> {
        self.conn.execute(
            UPDATE_TRACKER,
            params![
                tracker.id.to_string(),
                tracker.name,
                tracker.color.to_hex(),
                tracker.emoji,
                tracker.schedule.encode(),
                category_id
            ],
        )
    }

    pub fn set_pinned(&self, id: Uuid, pinned: bool) -> Result<usize> {
        self.conn.execute(UPDATE_PINNED, params![id.to_string(), pinned])
    }

    pub fn delete(&self, id: Uuid) -> Result<usize> {
        self.conn.execute(DELETE_TRACKER, params![id.to_string()])
    }

    pub fn delete_all(&self) -> Result<usize> {
        self.conn.execute(DELETE_ALL_TRACKERS, [])
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Tracker>> {
        self.conn
            .query_row(&format!("{} {}", SELECT_TRACKERS, WHERE_ID), params![id.to_string()], Self::from_row)
            .optional()
    }

    /// Trackers matching `filter`, ordered by name.
    pub fn fetch(&self, filter: TrackerFilter) -> Result<Vec<Tracker>> {
        let (mut stmt, params) = match filter {
            TrackerFilter::All => (self.conn.prepare(&format!("{} {}", SELECT_TRACKERS, ORDER_BY_NAME))?, vec![]),
            TrackerFilter::Pinned => (self.conn.prepare(&format!("{} {} {}", SELECT_TRACKERS, WHERE_PINNED, ORDER_BY_NAME))?, vec![]),
            TrackerFilter::InCategory(title) => (
                self.conn.prepare(&format!("{} {} {}", SELECT_TRACKERS, WHERE_CATEGORY, ORDER_BY_NAME))?,
                vec![title],
            ),
        };

        let tracker_iter = stmt.query_map(params_from_iter(params.iter()), Self::from_row)?;
        let mut trackers = Vec::new();
        for tracker_result in tracker_iter {
            trackers.push(tracker_result?);
        }

        Ok(trackers)
    }

    fn from_row(row: &Row<'_>) -> Result<Tracker> {
        Ok(Tracker {
            id: parse_id(row, 0)?,
            name: row.get(1)?,
            color: Color::from_hex(&row.get::<_, String>(2)?),
            emoji: row.get(3)?,
            schedule: Schedule::decode(&row.get::<_, String>(4)?),
            is_pinned: row.get(5)?,
            main_category: row.get(6)?,
        })
    }
}
