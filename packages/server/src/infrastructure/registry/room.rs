//! InMemory RoomRegistry 実装
//!
//! Room -> メンバー と 接続 -> 参加 Room の双方向インデックスを
//! 1 つの Mutex で保護します。メンバーが 0 になった Room は削除されます。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomRegistry, RoomToken};

#[derive(Default)]
struct Rooms {
    members: HashMap<RoomToken, HashSet<ConnectionId>>,
    joined: HashMap<ConnectionId, HashSet<RoomToken>>,
}

/// インメモリ RoomRegistry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    rooms: Mutex<Rooms>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在存在する Room 数
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.members.len()
    }

    /// 接続が参加している Room
    #[cfg(test)]
    pub async fn rooms_of(&self, connection_id: &ConnectionId) -> HashSet<RoomToken> {
        self.rooms
            .lock()
            .await
            .joined
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, connection_id: ConnectionId, room: RoomToken) -> bool {
        let mut rooms = self.rooms.lock().await;
        let inserted = rooms
            .members
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
        rooms.joined.entry(connection_id).or_default().insert(room);
        inserted
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomToken> {
        let mut rooms = self.rooms.lock().await;
        let Some(joined) = rooms.joined.remove(connection_id) else {
            return Vec::new();
        };

        for room in &joined {
            let now_empty = match rooms.members.get_mut(room) {
                Some(members) => {
                    members.remove(connection_id);
                    members.is_empty()
                }
                None => false,
            };
            if now_empty {
                rooms.members.remove(room);
            }
        }
        joined.into_iter().collect()
    }

    async fn members_except(
        &self,
        room: &RoomToken,
        exclude: &ConnectionId,
    ) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .members
            .get(room)
            .map(|members| members.iter().filter(|c| *c != exclude).cloned().collect())
            .unwrap_or_default()
    }
}
