mod memory;
mod postgres;

pub use memory::MemoryNotesService;
pub use postgres::PostgresNotesService;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Note, NoteDraft},
};

pub const NOTE_NOT_FOUND: &str = "Catatan tidak ditemukan";
pub const NOTE_NOT_ADDED: &str = "Catatan gagal ditambahkan";
pub const EDIT_NOT_FOUND: &str = "Gagal memperbarui catatan. Id tidak ditemukan";
pub const DELETE_NOT_FOUND: &str = "Catatan gagal dihapus. Id tidak ditemukan";
pub const ACCESS_DENIED: &str = "Anda tidak berhak mengakses resource ini";

/// Persistence and business rules for notes.
///
/// Missing notes surface as [`ApiError::NotFound`], a caller that does not own a note as
/// [`ApiError::Authorization`].
#[async_trait]
pub trait NotesService: Send + Sync {
    async fn add_note(&self, draft: NoteDraft) -> Result<String, ApiError>;

    /// Lists every note, or only those of `owner` when given.
    async fn get_notes(&self, owner: Option<&str>) -> Result<Vec<Note>, ApiError>;

    async fn get_note_by_id(&self, id: &str) -> Result<Note, ApiError>;

    async fn edit_note_by_id(&self, id: &str, draft: NoteDraft) -> Result<(), ApiError>;

    async fn delete_note_by_id(&self, id: &str) -> Result<(), ApiError>;

    async fn verify_note_owner(&self, id: &str, owner: &str) -> Result<(), ApiError>;
}

pub fn generate_note_id() -> String {
    format!("note-{}", Uuid::new_v4().simple())
}

fn check_owner(note_owner: Option<&str>, owner: &str) -> Result<(), ApiError> {
    if note_owner == Some(owner) {
        Ok(())
    } else {
        Err(ApiError::Authorization(ACCESS_DENIED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_ids_are_prefixed_and_unique() {
        let first = generate_note_id();
        let second = generate_note_id();

        assert!(first.starts_with("note-"));
        assert_ne!(first, second);
    }

    #[test]
    fn ownerless_notes_belong_to_nobody() {
        assert!(check_owner(Some("user-1"), "user-1").is_ok());
        assert!(matches!(
            check_owner(Some("user-1"), "user-2"),
            Err(ApiError::Authorization(_))
        ));
        assert!(matches!(
            check_owner(None, "user-1"),
            Err(ApiError::Authorization(_))
        ));
    }
}
