use chrono::Utc;
use uuid::Uuid;

use std::sync::Arc;

use crate::{
    dto::{NoteRequest, NoteResponse},
    error::ServiceError,
    models::NoteDraft,
    repository::NoteStore,
};

pub const CONTENT_REQUIRED: &str = "Note content can not be empty";

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(&self, request: NoteRequest) -> Result<NoteResponse, ServiceError> {
        let draft = validate(request)?;

        let note = self.store.insert(draft, Utc::now()).await?;
        tracing::info!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.store.find_all().await?;

        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn get_one_note(&self, id: &str) -> Result<NoteResponse, ServiceError> {
        let uuid = parse_id(id)?;

        self.store
            .find_one(uuid)
            .await?
            .map(NoteResponse::from)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: NoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let draft = validate(request)?;
        let uuid = parse_id(id)?;

        let note = self
            .store
            .update(uuid, draft, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        tracing::info!("updated note {}", note.id);

        Ok(note.into())
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let uuid = parse_id(id)?;

        if self.store.delete(uuid).await? {
            tracing::info!("deleted note {uuid}");
            Ok(())
        } else {
            Err(ServiceError::NotFound(id.to_string()))
        }
    }
}

fn validate(request: NoteRequest) -> Result<NoteDraft, ServiceError> {
    NoteDraft::new(request.title, request.content)
        .ok_or_else(|| ServiceError::Validation(CONTENT_REQUIRED.to_string()))
}

// A malformed id cannot name any stored note, so it reads as not found.
fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::DEFAULT_TITLE,
        repository::{FailingStore, InMemoryStore},
    };

    fn service() -> NoteService {
        NoteService::new(Arc::new(InMemoryStore::new()))
    }

    fn request(title: Option<&str>, content: Option<&str>) -> NoteRequest {
        NoteRequest {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_without_content_is_rejected_and_not_persisted() {
        let service = service();

        for req in [request(Some("Title"), None), request(None, Some(""))] {
            let result = service.create_note(req).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }

        assert!(service.get_all_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_without_title_uses_default() {
        let service = service();

        let note = service
            .create_note(request(None, Some("buy milk")))
            .await
            .unwrap();

        assert_eq!(note.title, DEFAULT_TITLE);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[tokio::test]
    async fn get_one_returns_created_note() {
        let service = service();
        let created = service
            .create_note(request(Some("Shopping"), Some("buy milk")))
            .await
            .unwrap();

        let fetched = service
            .get_one_note(&created.id.to_string())
            .await
            .unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn malformed_and_missing_ids_are_not_found() {
        let service = service();
        let missing = Uuid::new_v4().to_string();

        for id in ["not-an-id", missing.as_str()] {
            assert!(matches!(
                service.get_one_note(id).await,
                Err(ServiceError::NotFound(_))
            ));
            assert!(matches!(
                service.update_note(id, request(None, Some("x"))).await,
                Err(ServiceError::NotFound(_))
            ));
            assert!(matches!(
                service.delete_note(id).await,
                Err(ServiceError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn update_with_empty_content_leaves_note_unchanged() {
        let service = service();
        let created = service
            .create_note(request(Some("Shopping"), Some("buy milk")))
            .await
            .unwrap();
        let id = created.id.to_string();

        let result = service.update_note(&id, request(Some("New"), Some(""))).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));

        assert_eq!(service.get_one_note(&id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let service = service();
        let created = service
            .create_note(request(None, Some("buy milk")))
            .await
            .unwrap();
        let id = created.id.to_string();

        let updated = service
            .update_note(&id, request(Some("Shopping"), Some("buy milk and eggs")))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.title, "Shopping");
        assert_eq!(updated.content, "buy milk and eggs");
        assert_eq!(service.get_one_note(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_without_title_resets_to_default() {
        let service = service();
        let created = service
            .create_note(request(Some("Shopping"), Some("buy milk")))
            .await
            .unwrap();

        let updated = service
            .update_note(&created.id.to_string(), request(None, Some("buy bread")))
            .await
            .unwrap();

        assert_eq!(updated.title, DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let service = service();
        let keep = service
            .create_note(request(None, Some("keep")))
            .await
            .unwrap();
        let gone = service
            .create_note(request(None, Some("gone")))
            .await
            .unwrap();
        let gone_id = gone.id.to_string();

        service.delete_note(&gone_id).await.unwrap();

        assert!(matches!(
            service.get_one_note(&gone_id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(service.get_all_notes().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let service = NoteService::new(Arc::new(FailingStore));
        let id = Uuid::new_v4().to_string();

        assert!(matches!(
            service.create_note(request(None, Some("x"))).await,
            Err(ServiceError::Store(_))
        ));
        assert!(matches!(
            service.get_all_notes().await,
            Err(ServiceError::Store(_))
        ));
        assert!(matches!(
            service.get_one_note(&id).await,
            Err(ServiceError::Store(_))
        ));
        assert!(matches!(
            service.update_note(&id, request(None, Some("x"))).await,
            Err(ServiceError::Store(_))
        ));
        assert!(matches!(
            service.delete_note(&id).await,
            Err(ServiceError::Store(_))
        ));
    }
}
