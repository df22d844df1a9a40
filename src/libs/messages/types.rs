use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === TRACKER MESSAGES ===
    TrackerCreated(String),
    TrackerUpdated(String),
    TrackerDeleted(Uuid),
    TrackerNameEmpty,
    TrackerPinned(String),
    TrackerUnpinned(String),
    TrackerMoved(String, String, String), // name, from, to
    AllTrackersDeleted(usize),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryTitleEmpty,
    CategoryTitleReserved(String),
    PinnedCategoryCreated(String),
    PinnedCategoryReplaced(String, String), // old, new
    PinnedTitleInUse(String),

    // === COMPLETION MESSAGES ===
    CompletionMarked(Uuid, String),   // tracker id, date
    CompletionUnmarked(Uuid, String), // tracker id, date
    CompletionRecordsDeleted(usize),
    FutureDateCompletion(String),

    // === DECODING MESSAGES ===
    InvalidColor(String),

    // === STORE MESSAGES ===
    StoreOpened(String),
    QueryRefreshFailed(String),
    TransactionRolledBack(String),
    QueryRefreshed(usize), // tracker count

    // === CONFIGURATION MESSAGES ===
    ConfigLoaded(String),
    ConfigSaved(String),
    ConfigFileNotFound,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
