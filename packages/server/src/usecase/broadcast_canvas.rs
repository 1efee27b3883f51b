//! UseCase: キャンバス更新のブロードキャスト
//!
//! ## 配信範囲
//!
//! - Room 指定あり: その Room の送信者以外のメンバー
//! - Room 指定なし: プロセス内の送信者以外の全接続
//!
//! Room 指定なしのフォールバックは Room 機能以前の 2 者セッション向けの挙動で、
//! セッションをまたいで更新が漏れる。意図的に残している。
//!
//! 配信は fire-and-forget。個々の配信失敗は送信者に返さない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomRegistry, RoomToken};

/// キャンバス更新ブロードキャストのユースケース
pub struct BroadcastCanvasUseCase {
    rooms: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastCanvasUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms,
            message_pusher,
        }
    }

    /// ブロードキャストを実行し、配信対象の接続を返す
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続（配信対象から除外される）
    /// * `room` - 配信先の Room（None なら全接続）
    /// * `payload` - 送信する JSON（DTO 層で生成されたもの）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room: Option<&RoomToken>,
        payload: &str,
    ) -> Vec<ConnectionId> {
        let targets = match room {
            Some(room) => {
                tracing::debug!(
                    "Broadcasting canvas update from '{}' to room '{}'",
                    sender,
                    room
                );
                self.rooms.members_except(room, sender).await
            }
            None => {
                tracing::debug!(
                    "Broadcasting canvas update from '{}' without a room (unscoped)",
                    sender
                );
                self.message_pusher
                    .connected_ids()
                    .await
                    .into_iter()
                    .filter(|id| id != sender)
                    .collect()
            }
        };

        self.message_pusher
            .broadcast(targets.clone(), payload)
            .await;
        targets
    }
}
