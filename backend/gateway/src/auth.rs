//! Bearer-token authentication for inbound requests.
//!
//! Requests failing the check are rejected before any handler (and before
//! the analysis core) runs.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use axum::Json;
use tracing::warn;

use inkmath_core::ApiResponse;

use crate::server::AppState;

/// Extractor that requires `Authorization: Bearer <configured secret>`.
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = (StatusCode, Json<ApiResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) if token == state.auth_token => Ok(RequireAuth),
            Some(_) => {
                warn!("Rejecting request with invalid bearer token");
                Err(unauthorized())
            }
            None => {
                warn!("Rejecting request with missing Authorization header");
                Err(unauthorized())
            }
        }
    }
}

fn unauthorized() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("Unauthorized", None)),
    )
}
