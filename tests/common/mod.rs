#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use notes_api::{
    auth::Claims,
    error::ApiError,
    models::{Note, NoteDraft},
    service::NotesService,
};
use serde_json::Value;
use tower::util::ServiceExt;

use std::sync::Mutex;

pub const SECRET: &str = "test-access-token-key";

pub fn token_for(user: &str) -> String {
    encode(
        &Header::default(),
        &Claims {
            id: user.to_string(),
            // 2100-01-01
            exp: 4_102_444_800,
        },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

/// Runs an already built request through the router.
pub async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// How a [`RecordingService`] answers every call.
#[derive(Clone, Copy)]
pub enum Outcome {
    Succeed,
    NotFound,
    Forbidden,
    Invariant,
    Unexpected,
}

impl Outcome {
    fn result(self) -> Result<(), ApiError> {
        match self {
            Self::Succeed => Ok(()),
            Self::NotFound => Err(ApiError::NotFound("Catatan tidak ditemukan".to_string())),
            Self::Forbidden => Err(ApiError::Authorization(
                "Anda tidak berhak mengakses resource ini".to_string(),
            )),
            Self::Invariant => Err(ApiError::Invariant("Catatan gagal ditambahkan".to_string())),
            Self::Unexpected => Err(ApiError::Internal(
                "connection refused (os error 111)".to_string(),
            )),
        }
    }
}

/// Records the calls it receives and answers each with configured outcomes.
pub struct RecordingService {
    pub calls: Mutex<Vec<String>>,
    owner_check: Outcome,
    operation: Outcome,
}

impl RecordingService {
    pub const fn new(owner_check: Outcome, operation: Outcome) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            owner_check,
            operation,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn sample_note(id: &str) -> Note {
    let now = chrono::Utc::now();
    Note {
        id: id.to_string(),
        title: "untitled".to_string(),
        body: "Isi catatan".to_string(),
        tags: Vec::new(),
        owner: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl NotesService for RecordingService {
    async fn add_note(&self, draft: NoteDraft) -> Result<String, ApiError> {
        self.record(format!("add_note:{}:{:?}", draft.title, draft.owner));
        self.operation.result().map(|()| "note-recorded".to_string())
    }

    async fn get_notes(&self, owner: Option<&str>) -> Result<Vec<Note>, ApiError> {
        self.record(format!("get_notes:{owner:?}"));
        self.operation.result().map(|()| vec![sample_note("note-recorded")])
    }

    async fn get_note_by_id(&self, id: &str) -> Result<Note, ApiError> {
        self.record(format!("get_note_by_id:{id}"));
        self.operation.result().map(|()| sample_note(id))
    }

    async fn edit_note_by_id(&self, id: &str, _draft: NoteDraft) -> Result<(), ApiError> {
        self.record(format!("edit_note_by_id:{id}"));
        self.operation.result()
    }

    async fn delete_note_by_id(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete_note_by_id:{id}"));
        self.operation.result()
    }

    async fn verify_note_owner(&self, id: &str, owner: &str) -> Result<(), ApiError> {
        self.record(format!("verify_note_owner:{id}:{owner}"));
        self.owner_check.result()
    }
}
