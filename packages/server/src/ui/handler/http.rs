//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    domain::{Decision, MessageText, RequestId, UserId},
    infrastructure::dto::{
        http::{
            AcceptResponse, ChatHistoryResponse, CreateRequestBody, CreateRequestResponse,
            MessageSentResponse, ReceivedRequestsResponse, RejectResponse, RespondRequestBody,
            SendMessageBody,
        },
        websocket::StoredMessageDto,
    },
    ui::{auth::AuthUser, error::ApiError, state::AppState},
    usecase::{CollaborationError, SendOrigin},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /api/collaborate/request`
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    AuthUser(sender): AuthUser,
    payload: Result<Json<CreateRequestBody>, JsonRejection>,
) -> Result<Json<CreateRequestResponse>, ApiError> {
    let Json(body) = payload?;
    let target = required_id::<UserId>(body.target_user_id, "targetUserId")?;

    let request = state
        .create_collaboration_request_usecase
        .execute(sender, target)
        .await?;

    Ok(Json(CreateRequestResponse {
        message: "Collaboration request sent successfully".to_string(),
        room_id: request.room_token().as_str().to_string(),
        request_id: request.id.as_str().to_string(),
    }))
}

/// `GET /api/collaborate/received`
pub async fn list_received_requests(
    State(state): State<Arc<AppState>>,
    AuthUser(receiver): AuthUser,
) -> Result<Json<ReceivedRequestsResponse>, ApiError> {
    let received = state
        .list_received_requests_usecase
        .execute(&receiver)
        .await?;

    // Domain Model から DTO への変換
    Ok(Json(ReceivedRequestsResponse {
        requests: received.into_iter().map(Into::into).collect(),
    }))
}

/// `POST /api/collaborate/accept`
pub async fn accept_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<RespondRequestBody>, JsonRejection>,
) -> Result<Json<AcceptResponse>, ApiError> {
    let Json(body) = payload?;
    let request_id = required_id::<RequestId>(body.request_id, "requestId")?;

    let request = state
        .respond_collaboration_request_usecase
        .execute(&actor, &request_id, Decision::Accept)
        .await?;

    Ok(Json(AcceptResponse {
        message: "Collaboration request accepted".to_string(),
        room_id: request.room_token().as_str().to_string(),
    }))
}

/// `POST /api/collaborate/reject`
pub async fn reject_request(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<RespondRequestBody>, JsonRejection>,
) -> Result<Json<RejectResponse>, ApiError> {
    let Json(body) = payload?;
    let request_id = required_id::<RequestId>(body.request_id, "requestId")?;

    let request = state
        .respond_collaboration_request_usecase
        .execute(&actor, &request_id, Decision::Reject)
        .await?;

    Ok(Json(RejectResponse {
        message: "Collaboration request rejected".to_string(),
        request: request.into(),
    }))
}

/// `GET /api/messages/{contact_id}`
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<ChatHistoryResponse>, ApiError> {
    let contact = UserId::try_from(contact_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let history = state
        .get_history_usecase
        .execute(&caller, &contact)
        .await?;

    Ok(Json(ChatHistoryResponse {
        chat_history: history.into_iter().map(StoredMessageDto::from).collect(),
    }))
}

/// `POST /api/messages/{contact_id}`
pub async fn send_chat_message(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(contact_id): Path<String>,
    payload: Result<Json<SendMessageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageSentResponse>), ApiError> {
    let Json(body) = payload?;
    let contact = UserId::try_from(contact_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let text = MessageText::new(body.message.unwrap_or_default());

    let outcome = state
        .send_message_usecase
        .execute(caller, contact, text, SendOrigin::Api)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageSentResponse {
            message: "Message sent".to_string(),
            message_data: outcome.message.into(),
        }),
    ))
}

/// Converts a required body field into an identifier value object.
fn required_id<T>(value: Option<String>, field: &str) -> Result<T, CollaborationError>
where
    T: TryFrom<String>,
    T::Error: std::fmt::Display,
{
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CollaborationError::Validation(format!("{} is required", field)))?;
    T::try_from(value).map_err(|e| CollaborationError::Validation(format!("{}: {}", field, e)))
}
