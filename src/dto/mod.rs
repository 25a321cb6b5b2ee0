use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use std::borrow::Cow;

use crate::models::Note;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NotePayload {
    /// Note title, `untitled` when omitted
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, message = "\"title\" is not allowed to be empty"))]
    pub title: Option<String>,
    /// Note body
    #[serde(default, deserialize_with = "non_null")]
    #[validate(
        required(message = "\"body\" is required"),
        length(min = 1, message = "\"body\" is not allowed to be empty")
    )]
    pub body: Option<String>,
    /// Note tags
    #[serde(default, deserialize_with = "non_null")]
    #[validate(custom(function = "non_empty_tags"))]
    pub tags: Option<Vec<String>>,
}

// An absent field falls back to `None` through `default`; an explicit `null` is a type error.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn non_empty_tags(tags: &[String]) -> Result<(), ValidationError> {
    match tags.iter().position(String::is_empty) {
        Some(position) => Err(ValidationError::new("empty_tag").with_message(Cow::Owned(
            format!("\"tags[{position}]\" is not allowed to be empty"),
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_to_none() {
        let payload: NotePayload = serde_json::from_str(r#"{"body": "Isi"}"#).unwrap();

        assert!(payload.title.is_none());
        assert!(payload.tags.is_none());
    }

    #[test]
    fn explicit_nulls_are_rejected() {
        for raw in [
            r#"{"title": null, "body": "Isi"}"#,
            r#"{"body": null}"#,
            r#"{"body": "Isi", "tags": null}"#,
        ] {
            let error = serde_json::from_str::<NotePayload>(raw).unwrap_err();
            assert!(error.to_string().contains("invalid type: null"), "{raw}: {error}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteIdData {
    pub note_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotesData {
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NoteData {
    pub note: Note,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ResponseData {
    NoteId(NoteIdData),
    Notes(NotesData),
    Note(NoteData),
}

/// Body shared by every response of the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl Envelope {
    pub fn success(message: Option<&str>, data: Option<ResponseData>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.map(str::to_string),
            data,
        }
    }

    pub const fn fail(message: String) -> Self {
        Self {
            status: ResponseStatus::Fail,
            message: Some(message),
            data: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.to_string()),
            data: None,
        }
    }
}
