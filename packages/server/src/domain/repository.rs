//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ChatMessage, CollaborationRequest, RepositoryError, RequestId, UserId, UserProfile,
};

/// チャットメッセージの永続ストア（追記のみ）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを追記し、保存されたレコードを返す
    async fn append(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError>;

    /// 2 者間のメッセージを作成時刻の昇順で取得
    async fn query(&self, a: &UserId, b: &UserId) -> Result<Vec<ChatMessage>, RepositoryError>;
}

/// コラボレーションリクエストのストア
///
/// リクエストは削除されず、履歴として残る。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationRequestRepository: Send + Sync {
    /// pending リクエストを挿入
    ///
    /// 同じ (sender, receiver) の pending が既にあれば
    /// `RepositoryError::DuplicatePending`。確認と挿入はアトミックに行う。
    async fn insert_pending(&self, request: CollaborationRequest) -> Result<(), RepositoryError>;

    /// ID でリクエストを取得
    async fn find_by_id(
        &self,
        id: &RequestId,
    ) -> Result<Option<CollaborationRequest>, RepositoryError>;

    /// 受信者宛ての pending リクエストを取得
    async fn list_pending_for_receiver(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<CollaborationRequest>, RepositoryError>;

    /// 保存されているリクエストが pending の場合のみ上書きする（compare-and-set）
    ///
    /// 既に pending でなければ `RepositoryError::Conflict`。
    async fn replace_pending(&self, request: CollaborationRequest) -> Result<(), RepositoryError>;
}

/// ユーザープロフィールの参照先
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// プロフィールを取得（存在しなければ `RepositoryError::NotFound`）
    async fn get(&self, id: &UserId) -> Result<UserProfile, RepositoryError>;
}
