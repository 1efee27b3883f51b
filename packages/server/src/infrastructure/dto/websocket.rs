//! WebSocket event DTOs.
//!
//! Every frame is `{"event": <name>, "data": <payload>}`. Inbound and outbound
//! vocabularies are closed enums, so malformed client input is rejected at the
//! boundary.

use serde::{Deserialize, Serialize};

/// Inbound events (client -> server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join a canvas room
    JoinRoom(String),
    /// Canvas update to relay to the room (or everyone, if no room)
    CanvasUpdate(CanvasUpdateIn),
    /// Make this connection addressable by user id
    Register(String),
    /// Send a direct message
    SendMessage(SendMessageIn),
}

impl ClientEvent {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasUpdateIn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Opaque drawing data
    pub lines: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageIn {
    pub from: String,
    pub to: String,
    pub text: String,
}

/// Outbound events (server -> client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    CanvasUpdate(CanvasUpdateOut),
    /// Acknowledgement to the sender of a message
    MessageSent(StoredMessageDto),
    /// Delivery to an online recipient
    ReceiveMessage(StoredMessageDto),
    /// Rejected inbound frame (only sent to the offending connection)
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasUpdateOut {
    pub lines: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// A persisted chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessageDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    /// RFC 3339, UTC
    pub created_at: String,
    /// Unix milliseconds
    pub timestamp: i64,
}
