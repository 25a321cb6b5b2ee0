use async_trait::async_trait;

use std::sync::Arc;

use super::{
    DELETE_NOT_FOUND, EDIT_NOT_FOUND, NOTE_NOT_ADDED, NOTE_NOT_FOUND, NotesService, check_owner,
    generate_note_id,
};
use crate::{
    error::ApiError,
    models::{Note, NoteDraft},
    repository::Repository,
};

#[derive(Clone)]
pub struct PostgresNotesService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl PostgresNotesService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl NotesService for PostgresNotesService {
    async fn add_note(&self, draft: NoteDraft) -> Result<String, ApiError> {
        let id = generate_note_id();

        self.repo
            .lock()
            .await
            .insert_note(&id, &draft)
            .await?
            .ok_or_else(|| ApiError::Invariant(NOTE_NOT_ADDED.to_string()))
    }

    async fn get_notes(&self, owner: Option<&str>) -> Result<Vec<Note>, ApiError> {
        Ok(self.repo.lock().await.select_notes(owner).await?)
    }

    async fn get_note_by_id(&self, id: &str) -> Result<Note, ApiError> {
        self.repo
            .lock()
            .await
            .select_note(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOTE_NOT_FOUND.to_string()))
    }

    async fn edit_note_by_id(&self, id: &str, draft: NoteDraft) -> Result<(), ApiError> {
        if self.repo.lock().await.update_note(id, &draft).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound(EDIT_NOT_FOUND.to_string()))
        }
    }

    async fn delete_note_by_id(&self, id: &str) -> Result<(), ApiError> {
        if self.repo.lock().await.delete_note(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound(DELETE_NOT_FOUND.to_string()))
        }
    }

    async fn verify_note_owner(&self, id: &str, owner: &str) -> Result<(), ApiError> {
        let note_owner = self
            .repo
            .lock()
            .await
            .select_owner(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(NOTE_NOT_FOUND.to_string()))?;

        check_owner(note_owner.as_deref(), owner)
    }
}
