//! Display implementation for habitlog messages.
//!
//! All human-readable text lives here so that log lines and error values
//! render the same wording wherever a [`Message`] ends up.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TRACKER MESSAGES ===
            Message::TrackerCreated(name) => format!("Tracker '{}' created", name),
            Message::TrackerUpdated(name) => format!("Tracker '{}' updated", name),
            Message::TrackerDeleted(id) => format!("Tracker {} deleted", id),
            Message::TrackerNameEmpty => "Tracker name must not be empty".to_string(),
            Message::TrackerPinned(name) => format!("Tracker '{}' pinned", name),
            Message::TrackerUnpinned(name) => format!("Tracker '{}' unpinned", name),
            Message::TrackerMoved(name, from, to) => format!("Tracker '{}' moved from '{}' to '{}'", name, from, to),
            Message::AllTrackersDeleted(count) => format!("Deleted {} tracker(s)", count),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(title) => format!("Category '{}' created", title),
            Message::CategoryTitleEmpty => "Category title must not be empty".to_string(),
            Message::CategoryTitleReserved(title) => format!("Category title '{}' is reserved", title),
            Message::PinnedCategoryCreated(title) => format!("Pinned category '{}' created", title),
            Message::PinnedCategoryReplaced(old, new) => format!("Pinned category '{}' replaced by '{}'", old, new),
            Message::PinnedTitleInUse(title) => format!("Category '{}' already holds trackers and cannot be the pinned category", title),

            // === COMPLETION MESSAGES ===
            Message::CompletionMarked(id, date) => format!("Tracker {} completed on {}", id, date),
            Message::CompletionUnmarked(id, date) => format!("Tracker {} no longer completed on {}", id, date),
            Message::CompletionRecordsDeleted(count) => format!("Removed {} completion record(s)", count),
            Message::FutureDateCompletion(date) => format!("Cannot change completion for a future date ({})", date),

            // === DECODING MESSAGES ===
            Message::InvalidColor(value) => format!("Invalid color '{}', using fallback", value),

            // === STORE MESSAGES ===
            Message::StoreOpened(path) => format!("Tracker store opened at {}", path),
            Message::QueryRefreshFailed(error) => format!("Failed to refresh tracker list: {}", error),
            Message::TransactionRolledBack(reason) => format!("Transaction rolled back: {}", reason),
            Message::QueryRefreshed(count) => format!("Query refreshed, {} tracker(s)", count),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigFileNotFound => "Configuration file not found, using defaults".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };
        write!(f, "{}", text)
    }
}
