//! Bearer-token authentication extractor.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::{IdentityError, UserId};

use super::{error::ApiError, state::AppState};

/// The authenticated caller of an HTTP request
///
/// Reads `Authorization: Bearer <token>` and resolves it through the
/// configured `IdentityVerifier`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(IdentityError::MissingCredential)?;

        let user_id = state.identity_verifier.verify(credential)?;
        Ok(Self(user_id))
    }
}
