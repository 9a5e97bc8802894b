#![forbid(unsafe_code)]

pub mod repository;
pub mod snapshot;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, ResultSubmission, ResultSubmissionRepository, SessionSnapshotRepository,
    Storage, StorageError, StoredResult, SubmissionAck,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
