//! Typed change notifications emitted by the store.

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tracker,
    Category,
    CompletionRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change {
    pub entity: EntityKind,
    pub kind: ChangeKind,
}

impl Change {
    pub fn new(entity: EntityKind, kind: ChangeKind) -> Self {
        Change { entity, kind }
    }
}

/// Everything one committed operation (or batch) changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Records a change, ignoring exact duplicates.
    pub fn push(&mut self, entity: EntityKind, kind: ChangeKind) {
        let change = Change::new(entity, kind);
        if !self.changes.contains(&change) {
            self.changes.push(change);
        }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn touches(&self, entity: EntityKind) -> bool {
        self.changes.iter().any(|change| change.entity == entity)
    }

    /// Whether a tracker listing can look different after this change.
    pub fn affects_tracker_list(&self) -> bool {
        self.touches(EntityKind::Tracker) || self.touches(EntityKind::CompletionRecord)
    }
}

pub type Observer = Arc<dyn Fn(&ChangeSet) + Send + Sync>;
