//! # Habitlog - Habit and Event Tracker Storage
//!
//! Persistence and query engine for a habit tracker: trackers grouped into
//! categories, per-day completion records, and filtered, sectioned listings
//! for a presentation layer.
//!
//! ## Features
//!
//! - **Trackers**: habits with a weekly schedule, or one-off events
//! - **Categories**: every tracker has a home category; pinned trackers are
//!   listed under a reserved section
//! - **Completions**: at most one record per tracker per calendar day
//! - **Queries**: filter by date, category, name and completion state
//! - **Change Notifications**: observers learn about every committed change
//! - **Statistics**: aggregate completion figures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use habitlog::libs::query::TrackerQuery;
//! use habitlog::libs::store::TrackerStore;
//!
//! let store = TrackerStore::open_default()?;
//! for section in store.query_trackers(&TrackerQuery::today())?.iter() {
//!     println!("{}: {} tracker(s)", section.title, section.trackers.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod libs;
