//! UseCase: 接続処理
//!
//! 新しい WebSocket 接続を MessagePusher に登録し、プロセス内の全接続の一員にします。
//! ユーザーとしての登録（Presence）は `register` イベントで別途行われます。

use std::sync::Arc;

use duet_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, Timestamp};

/// 接続のユースケース
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// 接続を登録し、接続時刻を返す
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> Timestamp {
        let connected_at = Timestamp::new(self.clock.now_millis());
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        connected_at
    }
}
