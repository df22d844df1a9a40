//! SQLite persistence layer.
//!
//! [`db::Db`] opens the database file and applies [`migrations`]. The table
//! modules ([`categories`], [`trackers`], [`records`]) borrow a
//! `rusqlite::Connection`, so one transaction can span several of them:
//!
//! ```rust
//! use habitlog::db::{categories::Categories, db::Db, trackers::Trackers};
//! use habitlog::libs::color::Color;
//! use habitlog::libs::tracker::Tracker;
//!
//! let mut db = Db::open_in_memory()?;
//! let tx = db.conn.transaction()?;
//! let (category_id, _) = Categories::new(&tx).get_or_create("Health")?;
//! Trackers::new(&tx).insert(&Tracker::event("Dentist", Color::default(), "🦷"), category_id)?;
//! tx.commit()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Schema
//!
//! - `categories`: unique titles; `is_reserved` marks the pinned sentinel
//! - `trackers`: one row per tracker; `category_id` is the home category
//! - `completion_records`: one row per `(tracker_id, date)`, cascading on
//!   tracker deletion

use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

/// Connection setup.
pub mod db;

/// Versioned schema changes applied on open.
pub mod migrations;

/// Category rows and lookups.
pub mod categories;

/// Tracker rows, pin flag and filtered fetches.
pub mod trackers;

/// Per-day completion records.
pub mod records;

/// Reads a text column holding a uuid.
fn parse_id(row: &Row<'_>, index: usize) -> rusqlite::Result<Uuid> {
    let id: String = row.get(index)?;
    Uuid::parse_str(&id).map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
