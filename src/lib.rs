pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use auth::TokenVerifier;
use config::OwnershipPolicy;
use handlers::rest;
use service::NotesService;

/// State shared by every request handler.
pub struct AppState {
    pub service: Arc<dyn NotesService>,
    pub ownership: OwnershipPolicy,
    /// Present whenever `ownership` is enforced
    pub verifier: Option<TokenVerifier>,
}

impl AppState {
    /// Notes are scoped to the caller identified by an access token signed with `access_token_key`.
    pub fn enforced(service: Arc<dyn NotesService>, access_token_key: &str) -> Self {
        Self {
            service,
            ownership: OwnershipPolicy::Enforced,
            verifier: Some(TokenVerifier::new(access_token_key)),
        }
    }

    /// Notes are shared by every caller.
    pub fn ownerless(service: Arc<dyn NotesService>) -> Self {
        Self {
            service,
            ownership: OwnershipPolicy::Disabled,
            verifier: None,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", get(rest::get_notes).post(rest::post_note))
        .route(
            "/notes/{id}",
            get(rest::get_note_by_id)
                .put(rest::put_note_by_id)
                .delete(rest::delete_note_by_id),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes API is running").into_response()
}
