use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::Envelope;

pub const SERVER_FAILURE_MESSAGE: &str = "Maaf, terjadi kegagalan pada server kami.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Invariant(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    /// A request the extractors refused before it reached a handler
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status declared by a client error, `None` for anything unexpected.
    pub const fn client_status(&self) -> Option<StatusCode> {
        match self {
            Self::Invariant(_) => Some(StatusCode::BAD_REQUEST),
            Self::Authentication(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Authorization(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Rejected { status, .. } => Some(*status),
            Self::Database(_) | Self::Internal(_) => None,
        }
    }

}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Malformed or mistyped note content is a payload problem like any other
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::Invariant(rejection.body_text())
            }
            _ if rejection.status().is_client_error() => Self::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            },
            _ => Self::Internal(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(status) = self.client_status() {
            return (status, Json(Envelope::fail(self.to_string()))).into_response();
        }

        tracing::error!("unexpected failure while handling request: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::error(SERVER_FAILURE_MESSAGE)),
        )
            .into_response()
    }
}
