use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::{Client, NoTls, Row};
use uuid::Uuid;

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::{Note, NoteDraft};

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn insert(&self, draft: NoteDraft, at: DateTime<Utc>) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                &format!(
                    "INSERT INTO notes (title, content, created_at, updated_at) \
                     VALUES ($1, $2, $3, $3) RETURNING {NOTE_COLUMNS}"
                ),
                &[&draft.title, &draft.content, &at],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                &format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY seq"),
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: NoteDraft,
        at: DateTime<Utc>,
    ) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                &format!(
                    "UPDATE notes SET title = $1, content = $2, updated_at = GREATEST($3, created_at) \
                     WHERE id = $4 RETURNING {NOTE_COLUMNS}"
                ),
                &[&draft.title, &draft.content, &at, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
