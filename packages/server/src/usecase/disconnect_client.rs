//! UseCase: 切断処理
//!
//! 切断された接続を参照している全てのインデックスから取り除きます。
//! 1 接続につき 1 回だけ、接続ハンドルを解放する前に呼ばれます。
//!
//! ## 手順
//!
//! 1. PresenceRegistry から、この接続を指すエントリを削除
//! 2. 参加中の全ての Room から退出
//! 3. MessagePusher から登録解除

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRegistry, RoomRegistry, RoomToken, UserId};

/// 切断処理の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisconnectReport {
    /// Presence から外れたユーザー
    pub users: Vec<UserId>,
    /// 退出した Room
    pub rooms: Vec<RoomToken>,
}

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    presence: Arc<dyn PresenceRegistry>,
    rooms: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        rooms: Arc<dyn RoomRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            rooms,
            message_pusher,
        }
    }

    pub async fn execute(&self, connection_id: &ConnectionId) -> DisconnectReport {
        let users = self.presence.remove_by_connection(connection_id).await;
        let rooms = self.rooms.leave_all(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        for user in &users {
            tracing::info!("User '{}' disconnected", user);
        }
        DisconnectReport { users, rooms }
    }
}
