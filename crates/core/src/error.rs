use thiserror::Error;

use crate::bank::CatalogError;
use crate::engine::SessionError;
use crate::model::DifficultyError;

/// Any failure the core crate can report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
}
