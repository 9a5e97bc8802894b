//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::{CatalogError, SessionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AssessmentLoopService`.
///
/// Snapshot and submission failures are absorbed by the loop; only rejected
/// events, bootstrap problems and explicit history reads reach callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
