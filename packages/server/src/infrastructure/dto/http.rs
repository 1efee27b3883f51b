//! HTTP API request/response DTOs.
//!
//! Request bodies use optional fields so that a missing field is reported as a
//! 400 validation error rather than an extractor rejection.

use serde::{Deserialize, Serialize};

use super::websocket::StoredMessageDto;

/// `POST /api/collaborate/request`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub target_user_id: Option<String>,
}

/// `POST /api/collaborate/accept` and `/reject`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequestBody {
    pub request_id: Option<String>,
}

/// `POST /api/messages/{contactId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestResponse {
    pub message: String,
    pub room_id: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedRequestsResponse {
    pub requests: Vec<ReceivedRequestDto>,
}

/// A pending request as listed for its receiver. Carries no room token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedRequestDto {
    pub id: String,
    pub sender: SenderProfileDto,
    pub receiver: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderProfileDto {
    pub id: String,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptResponse {
    pub message: String,
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectResponse {
    pub message: String,
    pub request: CollaborationRequestDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRequestDto {
    pub id: String,
    pub sender: String,
    pub receiver: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryResponse {
    pub chat_history: Vec<StoredMessageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSentResponse {
    pub message: String,
    pub message_data: StoredMessageDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
