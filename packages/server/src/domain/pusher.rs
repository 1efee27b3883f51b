//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）を抽象化します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// クライアントへの送信チャンネル
///
/// UI 層で WebSocket ごとに生成され、MessagePusher に登録される。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信の抽象化
///
/// 送信はすべて fire-and-forget。配信失敗が送信元の操作を失敗させることはない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続中の全ての接続 ID
    async fn connected_ids(&self) -> Vec<ConnectionId>;

    /// 特定の接続に送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に送信（一部の失敗は無視して残りに配信する）
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str);
}
