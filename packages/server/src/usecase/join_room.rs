//! UseCase: Room への参加

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRegistry, RoomToken};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Room に参加する（冪等）
    pub async fn execute(&self, connection_id: ConnectionId, room: RoomToken) {
        let label = room.as_str().to_string();
        if self.rooms.join(connection_id.clone(), room).await {
            tracing::info!("Connection '{}' joined room '{}'", connection_id, label);
        } else {
            tracing::debug!("Connection '{}' already in room '{}'", connection_id, label);
        }
    }
}
