//! Conversion logic between DTOs and domain entities.

use duet_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, CollaborationRequest, ReceivedRequest, UserId, UserProfile, ValueObjectError,
};
use crate::infrastructure::dto::{http, seed::UserSeed, websocket};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<UserSeed> for UserProfile {
    type Error = ValueObjectError;

    fn try_from(seed: UserSeed) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(seed.id)?,
            display_name: seed.display_name,
            handle: seed.handle,
            avatar_url: seed.avatar_url,
        })
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for websocket::StoredMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            from: model.from.into_string(),
            to: model.to.into_string(),
            text: model.text.into_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
            timestamp: model.created_at.value(),
        }
    }
}

impl From<CollaborationRequest> for http::CollaborationRequestDto {
    fn from(model: CollaborationRequest) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            status: model.status.as_str().to_string(),
            sender: model.sender.into_string(),
            receiver: model.receiver.into_string(),
        }
    }
}

impl From<ReceivedRequest> for http::ReceivedRequestDto {
    fn from(model: ReceivedRequest) -> Self {
        let sender = match model.sender_profile {
            Some(profile) => http::SenderProfileDto {
                id: profile.id.into_string(),
                display_name: Some(profile.display_name),
                handle: Some(profile.handle),
                avatar_url: profile.avatar_url,
            },
            None => http::SenderProfileDto {
                id: model.request.sender.as_str().to_string(),
                display_name: None,
                handle: None,
                avatar_url: None,
            },
        };
        Self {
            id: model.request.id.as_str().to_string(),
            sender,
            receiver: model.request.receiver.into_string(),
            status: model.request.status.as_str().to_string(),
        }
    }
}
