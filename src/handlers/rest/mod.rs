use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    AppState,
    auth::Caller,
    dto::{
        Envelope, NoteData, NoteIdData, NotePayload, NotesData, ResponseData, ResponseStatus,
    },
    error::ApiError,
    models::{Note, NoteDraft},
    validation::validate_note_payload,
};

pub const NOTE_ADDED: &str = "Catatan berhasil ditambahkan";
pub const NOTE_UPDATED: &str = "Catatan berhasil diperbarui";
pub const NOTE_DELETED: &str = "Catatan berhasil dihapus";

#[derive(OpenApi)]
#[openapi(
    paths(
        post_note,
        get_notes,
        get_note_by_id,
        put_note_by_id,
        delete_note_by_id
    ),
    components(schemas(
        Note,
        NotePayload,
        Envelope,
        ResponseStatus,
        ResponseData,
        NoteIdData,
        NotesData,
        NoteData
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// A successful response: status code plus envelope.
#[derive(Debug)]
pub struct Reply {
    code: StatusCode,
    body: Envelope,
}

impl Reply {
    const fn ok(body: Envelope) -> Self {
        Self {
            code: StatusCode::OK,
            body,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NotePayload,
    responses(
        (status = 201, description = "Note created successfully", body = Envelope),
        (status = 400, description = "Invalid note payload", body = Envelope),
        (status = 401, description = "Missing or invalid access token", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn post_note(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Reply, ApiError> {
    let Json(payload) = payload?;
    validate_note_payload(&payload)?;

    let draft = NoteDraft::from_payload(payload, caller.owner_id().map(str::to_string));
    let note_id = state.service.add_note(draft).await?;
    tracing::info!("created note {note_id}");

    Ok(Reply {
        code: StatusCode::CREATED,
        body: Envelope::success(
            Some(NOTE_ADDED),
            Some(ResponseData::NoteId(NoteIdData { note_id })),
        ),
    })
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Notes visible to the caller", body = Envelope),
        (status = 401, description = "Missing or invalid access token", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_notes(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Reply, ApiError> {
    let notes = state.service.get_notes(caller.owner_id()).await?;

    Ok(Reply::ok(Envelope::success(
        None,
        Some(ResponseData::Notes(NotesData { notes })),
    )))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = Envelope),
        (status = 401, description = "Missing or invalid access token", body = Envelope),
        (status = 403, description = "Note belongs to another user", body = Envelope),
        (status = 404, description = "Note not found", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note_by_id(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Reply, ApiError> {
    if let Some(owner) = caller.owner_id() {
        state.service.verify_note_owner(&id, owner).await?;
    }
    let note = state.service.get_note_by_id(&id).await?;

    Ok(Reply::ok(Envelope::success(
        None,
        Some(ResponseData::Note(NoteData { note })),
    )))
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = NotePayload,
    responses(
        (status = 200, description = "Note updated successfully", body = Envelope),
        (status = 400, description = "Invalid note payload", body = Envelope),
        (status = 401, description = "Missing or invalid access token", body = Envelope),
        (status = 403, description = "Note belongs to another user", body = Envelope),
        (status = 404, description = "Note not found", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn put_note_by_id(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<String>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Reply, ApiError> {
    let Json(payload) = payload?;
    validate_note_payload(&payload)?;

    if let Some(owner) = caller.owner_id() {
        state.service.verify_note_owner(&id, owner).await?;
    }
    state
        .service
        .edit_note_by_id(&id, NoteDraft::from_payload(payload, None))
        .await?;
    tracing::info!("updated note {id}");

    Ok(Reply::ok(Envelope::success(Some(NOTE_UPDATED), None)))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = Envelope),
        (status = 401, description = "Missing or invalid access token", body = Envelope),
        (status = 403, description = "Note belongs to another user", body = Envelope),
        (status = 404, description = "Note not found", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note_by_id(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Reply, ApiError> {
    if let Some(owner) = caller.owner_id() {
        state.service.verify_note_owner(&id, owner).await?;
    }
    state.service.delete_note_by_id(&id).await?;
    tracing::info!("deleted note {id}");

    Ok(Reply::ok(Envelope::success(Some(NOTE_DELETED), None)))
}
