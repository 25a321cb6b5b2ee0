use validator::{Validate, ValidationErrors};

use crate::{dto::NotePayload, error::ApiError};

// Fields are reported in declaration order so the first failure is stable.
const FIELD_ORDER: [&str; 3] = ["title", "body", "tags"];

/// Rejects a note payload that does not match the expected shape.
///
/// # Errors
///
/// Returns [`ApiError::Invariant`] carrying the first failing rule's message.
pub fn validate_note_payload(payload: &NotePayload) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|errors| ApiError::Invariant(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(title: Option<&str>, body: Option<&str>, tags: Option<Vec<&str>>) -> NotePayload {
        NotePayload {
            title: title.map(str::to_string),
            body: body.map(str::to_string),
            tags: tags.map(|tags| tags.into_iter().map(str::to_string).collect()),
        }
    }

    #[test]
    fn accepts_full_payload() {
        let payload = payload(Some("Catatan A"), Some("Isi"), Some(vec!["android", "web"]));
        assert!(validate_note_payload(&payload).is_ok());
    }

    #[test]
    fn accepts_body_only() {
        assert!(validate_note_payload(&payload(None, Some("Isi"), None)).is_ok());
    }

    #[test]
    fn rejects_missing_body() {
        for candidate in [
            payload(None, None, None),
            payload(Some("Catatan A"), None, None),
            payload(Some("Catatan A"), None, Some(vec!["web"])),
        ] {
            match validate_note_payload(&candidate) {
                Err(ApiError::Invariant(message)) => assert_eq!(message, "\"body\" is required"),
                other => panic!("expected invariant error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty_strings() {
        assert!(matches!(
            validate_note_payload(&payload(None, Some(""), None)),
            Err(ApiError::Invariant(_))
        ));
        assert!(matches!(
            validate_note_payload(&payload(Some(""), Some("Isi"), None)),
            Err(ApiError::Invariant(_))
        ));
    }

    #[test]
    fn rejects_empty_tag() {
        match validate_note_payload(&payload(None, Some("Isi"), Some(vec!["web", ""]))) {
            Err(ApiError::Invariant(message)) => {
                assert_eq!(message, "\"tags[1]\" is not allowed to be empty");
            }
            other => panic!("expected invariant error, got {other:?}"),
        }
    }

    #[test]
    fn reports_body_before_tags() {
        match validate_note_payload(&payload(None, None, Some(vec![""]))) {
            Err(ApiError::Invariant(message)) => assert_eq!(message, "\"body\" is required"),
            other => panic!("expected invariant error, got {other:?}"),
        }
    }
}
