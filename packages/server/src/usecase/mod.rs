//! UseCase layer
//!
//! 1 ユースケース = 1 構造体。依存は `Arc<dyn Trait>` で注入します。
//!
//! - 接続: `ConnectClientUseCase`, `DisconnectClientUseCase`
//! - Presence / Room: `RegisterPresenceUseCase`, `JoinRoomUseCase`, `BroadcastCanvasUseCase`
//! - チャット: `SendMessageUseCase`, `GetHistoryUseCase`
//! - コラボレーション: `CreateCollaborationRequestUseCase`, `ListReceivedRequestsUseCase`,
//!   `RespondCollaborationRequestUseCase`

mod broadcast_canvas;
mod connect_client;
mod create_collaboration_request;
mod disconnect_client;
pub mod error;
mod get_history;
mod join_room;
mod list_received_requests;
mod register_presence;
mod respond_collaboration_request;
mod send_message;
mod storage;

pub use broadcast_canvas::BroadcastCanvasUseCase;
pub use connect_client::ConnectClientUseCase;
pub use create_collaboration_request::CreateCollaborationRequestUseCase;
pub use disconnect_client::{DisconnectClientUseCase, DisconnectReport};
pub use error::{CollaborationError, GetHistoryError, SendMessageError};
pub use get_history::GetHistoryUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_received_requests::ListReceivedRequestsUseCase;
pub use register_presence::RegisterPresenceUseCase;
pub use respond_collaboration_request::RespondCollaborationRequestUseCase;
pub use send_message::{SendMessageUseCase, SendOrigin, SendOutcome};
