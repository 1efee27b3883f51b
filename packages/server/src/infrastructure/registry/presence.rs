//! InMemory PresenceRegistry 実装
//!
//! ユーザー ID -> 接続 ID の単一マップを 1 つの Mutex で保護します。
//! register / lookup / remove_by_connection は互いにアトミック。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, UserId};

/// インメモリ PresenceRegistry 実装
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    entries: Mutex<HashMap<UserId, ConnectionId>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のユーザー数
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(&self, user_id: UserId, connection_id: ConnectionId) {
        let mut entries = self.entries.lock().await;
        if let Some(previous) = entries.insert(user_id.clone(), connection_id.clone()) {
            if previous != connection_id {
                tracing::debug!(
                    "User '{}' re-registered: '{}' -> '{}'",
                    user_id,
                    previous,
                    connection_id
                );
            }
        }
    }

    async fn lookup(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.entries.lock().await.get(user_id).cloned()
    }

    async fn remove_by_connection(&self, connection_id: &ConnectionId) -> Vec<UserId> {
        let mut entries = self.entries.lock().await;
        let mut removed = Vec::new();
        entries.retain(|user_id, current| {
            if current == connection_id {
                removed.push(user_id.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}
