//! Domain layer
//!
//! ## 構成
//!
//! - `value_object`: 識別子・本文・時刻
//! - `entity`: ChatMessage, CollaborationRequest, UserProfile
//! - `error`: ドメインエラー
//! - `repository`: 永続化の trait（MessageStore など）
//! - `pusher`: クライアントへの送信の trait
//! - `registry`: Presence / Room の trait
//! - `identity`: 認証情報検証の trait

pub mod entity;
pub mod error;
pub mod identity;
pub mod pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, CollaborationRequest, Decision, ReceivedRequest, RequestStatus, UserProfile,
};
pub use error::{
    IdentityError, MessagePushError, RepositoryError, TransitionError, ValueObjectError,
};
pub use identity::IdentityVerifier;
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{PresenceRegistry, RoomRegistry};
pub use repository::{CollaborationRequestRepository, MessageStore, UserDirectory};
pub use value_object::{
    ConnectionId, MessageId, MessageText, RequestId, RoomToken, Timestamp, UserId,
};

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::{MockCollaborationRequestRepository, MockMessageStore, MockUserDirectory};
