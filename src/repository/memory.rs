use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{NoteStore, StoreError};
use crate::models::{Note, NoteDraft};

/// Process-local store keeping notes in insertion order. Contents are lost on
/// restart.
#[derive(Default)]
pub struct InMemoryStore {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl NoteStore for InMemoryStore {
    async fn insert(&self, draft: NoteDraft, at: DateTime<Utc>) -> Result<Note, StoreError> {
        let note = Note {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            created_at: at,
            updated_at: at,
        };

        self.notes.write().map_err(poisoned)?.push(note.clone());

        Ok(note)
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.read().map_err(poisoned)?.clone())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.read().map_err(poisoned)?;

        Ok(notes.iter().find(|note| note.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        draft: NoteDraft,
        at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().map_err(poisoned)?;

        Ok(notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = draft.title;
            note.content = draft.content;
            note.updated_at = at.max(note.created_at);
            note.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut notes = self.notes.write().map_err(poisoned)?;
        let before = notes.len();
        notes.retain(|note| note.id != id);

        Ok(notes.len() != before)
    }
}

/// Store double whose every operation fails, for exercising error paths.
#[cfg(test)]
pub struct FailingStore;

#[cfg(test)]
#[async_trait]
impl NoteStore for FailingStore {
    async fn insert(&self, _: NoteDraft, _: DateTime<Utc>) -> Result<Note, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_one(&self, _: Uuid) -> Result<Option<Note>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(
        &self,
        _: Uuid,
        _: NoteDraft,
        _: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
