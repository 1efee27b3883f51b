//! Presence / Room のレジストリ trait 定義
//!
//! どちらもプロセス内の共有状態。各操作は 1 回の read/modify/write として
//! アトミックに行われ、永続ストアの呼び出しをまたいでロックを保持しない。

use async_trait::async_trait;

use super::{ConnectionId, RoomToken, UserId};

/// ログイン中のユーザーと接続の対応表
///
/// 1 ユーザーにつき現在の接続は高々 1 つ（後勝ち）。
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// 既存の対応を無条件に上書きする
    async fn register(&self, user_id: UserId, connection_id: ConnectionId);

    /// ユーザーの現在の接続
    async fn lookup(&self, user_id: &UserId) -> Option<ConnectionId>;

    /// 指定の接続を指すエントリを全て削除し、削除したユーザーを返す（冪等）
    async fn remove_by_connection(&self, connection_id: &ConnectionId) -> Vec<UserId>;
}

/// Room のメンバーシップ
///
/// Room は最初の join で暗黙に作られ、メンバーが 0 になると消える。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Room に参加する（冪等）。新たに参加した場合 true
    async fn join(&self, connection_id: ConnectionId, room: RoomToken) -> bool;

    /// 参加している全ての Room から抜け、抜けた Room を返す
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomToken>;

    /// 指定の接続を除いた Room のメンバー
    async fn members_except(&self, room: &RoomToken, exclude: &ConnectionId)
    -> Vec<ConnectionId>;
}
