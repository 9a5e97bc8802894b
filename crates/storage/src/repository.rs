use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::SessionState;
use quiz_core::report::RawResultData;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::snapshot::{decode_snapshot, encode_snapshot};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One completed assessment as handed to the result store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSubmission {
    pub tool_id: String,
    pub version: u32,
    pub summary: String,
    pub raw_data: RawResultData,
    pub submitted_at: DateTime<Utc>,
}

/// Answer of the result store to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionAck {
    pub ok: bool,
    /// Row id assigned by the store, when it has one.
    pub id: Option<i64>,
}

impl SubmissionAck {
    #[must_use]
    pub fn accepted(id: i64) -> Self {
        Self { ok: true, id: Some(id) }
    }

    #[must_use]
    pub fn rejected() -> Self {
        Self { ok: false, id: None }
    }
}

/// A submission read back from the result store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    pub id: i64,
    pub submission: ResultSubmission,
}

/// Whole-state snapshot store keyed by a session key.
#[async_trait]
pub trait SessionSnapshotRepository: Send + Sync {
    /// Fetch the snapshot stored under `key`.
    ///
    /// A missing snapshot is `Ok(None)`, the normal fresh-session case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable or the stored blob
    /// cannot be decoded.
    async fn load_snapshot(&self, key: &str) -> Result<Option<SessionState>, StorageError>;

    /// Replace the snapshot stored under `key`, stamped with `saved_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or stored.
    async fn save_snapshot(
        &self,
        key: &str,
        state: &SessionState,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Remove the snapshot under `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store is unreachable.
    async fn clear_snapshot(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ResultSubmissionRepository: Send + Sync {
    /// Store one completed assessment.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn submit(&self, submission: &ResultSubmission) -> Result<SubmissionAck, StorageError>;

    /// All results stored for `tool_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the results cannot be read or decoded.
    async fn list_results(&self, tool_id: &str) -> Result<Vec<StoredResult>, StorageError>;
}

/// In-memory backend for tests and the `memory` app mode.
///
/// Snapshots are kept in their encoded JSON form so both backends go through
/// the same codec.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    snapshots: Arc<Mutex<HashMap<String, String>>>,
    results: Arc<Mutex<Vec<StoredResult>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionSnapshotRepository for InMemoryRepository {
    async fn load_snapshot(&self, key: &str) -> Result<Option<SessionState>, StorageError> {
        let guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(key).map(|raw| decode_snapshot(raw)).transpose()
    }

    async fn save_snapshot(
        &self,
        key: &str,
        state: &SessionState,
        _saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let raw = encode_snapshot(state)?;
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), raw);
        Ok(())
    }

    async fn clear_snapshot(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl ResultSubmissionRepository for InMemoryRepository {
    async fn submit(&self, submission: &ResultSubmission) -> Result<SubmissionAck, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = i64::try_from(guard.len() + 1)
            .map_err(|_| StorageError::Serialization("result id overflow".into()))?;
        guard.push(StoredResult {
            id,
            submission: submission.clone(),
        });
        Ok(SubmissionAck::accepted(id))
    }

    async fn list_results(&self, tool_id: &str) -> Result<Vec<StoredResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|r| r.submission.tool_id == tool_id)
            .cloned()
            .collect())
    }
}

/// Aggregates the snapshot and result repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub snapshots: Arc<dyn SessionSnapshotRepository>,
    pub results: Arc<dyn ResultSubmissionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let snapshots: Arc<dyn SessionSnapshotRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultSubmissionRepository> = Arc::new(repo);
        Self { snapshots, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;
    use quiz_core::{AssessmentEngine, FixedSequence, SessionEvent};

    fn submission(tool_id: &str) -> ResultSubmission {
        let engine = AssessmentEngine::standard();
        let report = engine.report(&engine.fresh_session(fixed_now()));
        ResultSubmission {
            tool_id: tool_id.to_owned(),
            version: 1,
            summary: report.summary_line(),
            raw_data: report.raw_data(fixed_now(), None),
            submitted_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn missing_snapshot_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_snapshot("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_round_trips_and_clears() {
        let repo = InMemoryRepository::new();
        let engine = AssessmentEngine::standard();
        let mut rng = FixedSequence::first();
        let state = engine
            .reduce(&engine.fresh_session(fixed_now()), SessionEvent::Start, &mut rng)
            .unwrap();

        repo.save_snapshot("k", &state, fixed_now()).await.unwrap();
        assert_eq!(repo.load_snapshot("k").await.unwrap(), Some(state));

        repo.clear_snapshot("k").await.unwrap();
        assert!(repo.load_snapshot("k").await.unwrap().is_none());
        // Clearing twice is fine.
        repo.clear_snapshot("k").await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.snapshots
            .lock()
            .unwrap()
            .insert("k".into(), "garbage".into());
        let err = repo.load_snapshot("k").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn results_are_listed_per_tool() {
        let storage = Storage::in_memory();
        let first = storage.results.submit(&submission("quiz")).await.unwrap();
        let _ = storage.results.submit(&submission("other")).await.unwrap();
        let second = storage.results.submit(&submission("quiz")).await.unwrap();
        assert!(first.ok && second.ok);
        assert_ne!(first.id, second.id);

        let listed = storage.results.list_results("quiz").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|r| Some(r.id)).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(listed[0].submission, submission("quiz"));
    }
}
