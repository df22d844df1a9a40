//! Core library modules for habitlog.
//!
//! ## Features
//!
//! - **Core Infrastructure**: configuration, data storage, logging, messages
//! - **Domain Model**: trackers, schedules, colours, completion records
//! - **Store**: transactional commands, reads and change notifications
//! - **Presentation Support**: queries, the live tracker list, statistics
//!
//! ## Usage
//!
//! ```rust
//! use habitlog::libs::config::Config;
//! use habitlog::libs::store::TrackerStore;
//!
//! let store = TrackerStore::open_in_memory(&Config::default())?;
//! store.create_category("Health")?;
//! assert_eq!(store.list_categories()?.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod color;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod events;
pub mod list;
pub mod logging;
pub mod messages;
pub mod query;
pub mod schedule;
pub mod statistics;
pub mod store;
pub mod tracker;
