//! UseCase: Presence 登録
//!
//! 接続をユーザー ID で宛先指定できるようにします（後勝ち）。

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceRegistry, UserId};

/// Presence 登録のユースケース
pub struct RegisterPresenceUseCase {
    presence: Arc<dyn PresenceRegistry>,
}

impl RegisterPresenceUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    pub async fn execute(&self, user_id: UserId, connection_id: ConnectionId) {
        tracing::info!(
            "User '{}' registered with connection '{}'",
            user_id,
            connection_id
        );
        self.presence.register(user_id, connection_id).await;
    }
}
