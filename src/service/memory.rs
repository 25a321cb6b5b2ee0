use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    DELETE_NOT_FOUND, EDIT_NOT_FOUND, NOTE_NOT_FOUND, NotesService, check_owner, generate_note_id,
};
use crate::{
    error::ApiError,
    models::{Note, NoteDraft},
};

/// Keeps notes in process memory, in insertion order.
#[derive(Default)]
pub struct MemoryNotesService {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNotesService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotesService for MemoryNotesService {
    async fn add_note(&self, draft: NoteDraft) -> Result<String, ApiError> {
        let now = Utc::now();
        let id = generate_note_id();

        self.notes.write().await.push(Note {
            id: id.clone(),
            title: draft.title,
            body: draft.body,
            tags: draft.tags,
            owner: draft.owner,
            created_at: now,
            updated_at: now,
        });
        tracing::debug!("stored note {id}");

        Ok(id)
    }

    async fn get_notes(&self, owner: Option<&str>) -> Result<Vec<Note>, ApiError> {
        let notes = self.notes.read().await;

        Ok(notes
            .iter()
            .filter(|note| owner.is_none_or(|owner| note.owner.as_deref() == Some(owner)))
            .cloned()
            .collect())
    }

    async fn get_note_by_id(&self, id: &str) -> Result<Note, ApiError> {
        self.notes
            .read()
            .await
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(NOTE_NOT_FOUND.to_string()))
    }

    async fn edit_note_by_id(&self, id: &str, draft: NoteDraft) -> Result<(), ApiError> {
        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| ApiError::NotFound(EDIT_NOT_FOUND.to_string()))?;

        note.title = draft.title;
        note.body = draft.body;
        note.tags = draft.tags;
        note.updated_at = Utc::now();

        Ok(())
    }

    async fn delete_note_by_id(&self, id: &str) -> Result<(), ApiError> {
        let mut notes = self.notes.write().await;
        let index = notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| ApiError::NotFound(DELETE_NOT_FOUND.to_string()))?;

        notes.remove(index);

        Ok(())
    }

    async fn verify_note_owner(&self, id: &str, owner: &str) -> Result<(), ApiError> {
        let notes = self.notes.read().await;
        let note = notes
            .iter()
            .find(|note| note.id == id)
            .ok_or_else(|| ApiError::NotFound(NOTE_NOT_FOUND.to_string()))?;

        check_owner(note.owner.as_deref(), owner)
    }
}
