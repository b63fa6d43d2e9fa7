//! Note persistence behind a small storage trait.
mod embedded;
mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Note, NoteDraft};

pub use memory::InMemoryStore;
pub use postgres::Repository;

#[cfg(test)]
pub use memory::FailingStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A single collection of notes addressed by store-assigned ids.
///
/// Every method is one document-level operation; implementations must be
/// `Send + Sync` because the store is shared by all request handlers.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a new note, assigning its id. Both timestamps are set to `at`.
    async fn insert(&self, draft: NoteDraft, at: DateTime<Utc>) -> Result<Note, StoreError>;

    /// All notes in insertion order.
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Replace title and content and refresh `updated_at`, never moving it
    /// before `created_at`. Returns the updated note, or `None` if absent.
    async fn update(
        &self,
        id: Uuid,
        draft: NoteDraft,
        at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError>;

    /// Returns whether a note was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
