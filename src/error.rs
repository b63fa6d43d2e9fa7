use thiserror::Error;

use crate::repository::StoreError;

/// Failure of a single note operation, checked by variant when answering.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Note not found with id {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
