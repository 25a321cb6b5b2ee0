use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use std::sync::Arc;

use crate::{AppState, config::OwnershipPolicy, error::ApiError};

/// Claims carried by an access token. Tokens are minted elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub exp: u64,
}

/// Identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Validates an HS256 access token and returns the caller it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] for a malformed, forged or expired token.
    pub fn verify(&self, token: &str) -> Result<Credential, ApiError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!("rejected access token: {e}");
            ApiError::Authentication("Token tidak valid".to_string())
        })?;

        Ok(Credential { id: data.claims.id })
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Authentication("Missing authentication".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Authentication("Invalid authorization header".to_string()))
}

/// The party a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Owner(Credential),
    Anonymous,
}

impl Caller {
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            Self::Owner(credential) => Some(&credential.id),
            Self::Anonymous => None,
        }
    }
}

impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match state.ownership {
            OwnershipPolicy::Disabled => Ok(Self::Anonymous),
            OwnershipPolicy::Enforced => {
                let verifier = state.verifier.as_ref().ok_or_else(|| {
                    ApiError::Internal("ownership enforced without a token verifier".to_string())
                })?;
                let credential = verifier.verify(bearer_token(&parts.headers)?)?;

                Ok(Self::Owner(credential))
            }
        }
    }
}
