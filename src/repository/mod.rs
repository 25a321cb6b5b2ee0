mod embedded;

use embedded::migrations;

use tokio_postgres::{Client, NoTls, Row};

use crate::models::{Note, NoteDraft};

const NOTE_COLUMNS: &str = "id, title, body, tags, owner, created_at, updated_at";

pub struct Repository {
    client: Client,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        tags: row.get("tags"),
        owner: row.get("owner"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
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

    pub async fn insert_note(
        &self,
        id: &str,
        draft: &NoteDraft,
    ) -> Result<Option<String>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "INSERT INTO notes (id, title, body, tags, owner) VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id",
                &[&id, &draft.title, &draft.body, &draft.tags, &draft.owner],
            )
            .await?;

        Ok(row.map(|row| row.get("id")))
    }

    pub async fn select_notes(
        &self,
        owner: Option<&str>,
    ) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = match owner {
            Some(owner) => {
                self.client
                    .query(
                        &format!(
                            "SELECT {NOTE_COLUMNS} FROM notes WHERE owner = $1 ORDER BY created_at"
                        ),
                        &[&owner],
                    )
                    .await?
            }
            None => {
                self.client
                    .query(
                        &format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at"),
                        &[],
                    )
                    .await?
            }
        };

        Ok(rows.iter().map(note_from_row).collect())
    }

    pub async fn select_note(&self, id: &str) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn update_note(
        &self,
        id: &str,
        draft: &NoteDraft,
    ) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute(
                "UPDATE notes SET title = $1, body = $2, tags = $3, updated_at = NOW() \
                 WHERE id = $4",
                &[&draft.title, &draft.body, &draft.tags, &id],
            )
            .await?;

        Ok(rows == 1)
    }

    pub async fn delete_note(&self, id: &str) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    pub async fn select_owner(
        &self,
        id: &str,
    ) -> Result<Option<Option<String>>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt("SELECT owner FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(row.map(|row| row.get("owner")))
    }
}
