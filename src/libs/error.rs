//! Error taxonomy for store operations.

use super::messages::Message;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field was empty or a reserved value was used.
    #[error("{0}")]
    Validation(Message),

    /// The operation referenced a tracker that does not exist.
    #[error("Tracker {0} not found")]
    NotFound(Uuid),

    /// SQLite failed to apply or commit the write; nothing was changed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
