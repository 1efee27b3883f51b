//! HTTP error responses.
//!
//! Every failure is rendered as `{"error": "<message>"}` with a status code
//! chosen by error kind.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::IdentityError,
    infrastructure::dto::http::ErrorResponse,
    usecase::{CollaborationError, GetHistoryError, SendMessageError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 401
    Unauthorized(String),
    /// 403
    Forbidden(String),
    /// 404
    NotFound(String),
    /// 500
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
        }
        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        tracing::debug!("Rejected credential: {}", e);
        let message = match e {
            IdentityError::MissingCredential => "Access denied. No token provided.",
            IdentityError::InvalidCredential(_) => "Invalid token.",
        };
        Self::Unauthorized(message.to_string())
    }
}

impl From<SendMessageError> for ApiError {
    fn from(e: SendMessageError) -> Self {
        match e {
            SendMessageError::Validation(_) => Self::BadRequest(e.to_string()),
            SendMessageError::Storage(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<GetHistoryError> for ApiError {
    fn from(e: GetHistoryError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<CollaborationError> for ApiError {
    fn from(e: CollaborationError) -> Self {
        let message = e.to_string();
        match e {
            CollaborationError::Validation(_)
            | CollaborationError::SelfTarget
            | CollaborationError::DuplicatePending
            | CollaborationError::InvalidState(_) => Self::BadRequest(message),
            CollaborationError::Forbidden => Self::Forbidden(message),
            CollaborationError::NotFound => Self::NotFound(message),
            CollaborationError::Storage(_) => Self::Internal(message),
        }
    }
}
