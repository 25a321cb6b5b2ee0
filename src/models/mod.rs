use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::NotePayload;

pub const DEFAULT_TITLE: &str = "untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub body: String,
    /// Note tags
    pub tags: Vec<String>,
    /// ID of the user who created the note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Note contents as handed to the service on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub owner: Option<String>,
}

impl NoteDraft {
    /// Builds a draft from a payload that already passed validation.
    pub fn from_payload(payload: NotePayload, owner: Option<String>) -> Self {
        Self {
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.unwrap_or_default(),
            tags: payload.tags.unwrap_or_default(),
            owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_applies_defaults() {
        let payload = NotePayload {
            title: None,
            body: Some("Isi catatan".to_string()),
            tags: None,
        };

        let draft = NoteDraft::from_payload(payload, Some("user-1".to_string()));

        assert_eq!(draft.title, "untitled");
        assert_eq!(draft.body, "Isi catatan");
        assert!(draft.tags.is_empty());
        assert_eq!(draft.owner.as_deref(), Some("user-1"));
    }

    #[test]
    fn note_serializes_with_camel_case_timestamps() {
        let now = Utc::now();
        let note = Note {
            id: "note-1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            tags: vec!["x".to_string()],
            owner: None,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("owner").is_none());
    }
}
