//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{kind} is too long (max {max} bytes, got {actual})")]
    TooLong {
        kind: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Repository（永続化層）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// ストレージ障害
    #[error("storage failure: {0}")]
    Storage(String),

    /// ストレージ呼び出しのタイムアウト
    #[error("storage call timed out after {0} ms")]
    Timeout(u128),

    /// 同じ (sender, receiver) の pending リクエストが既に存在する
    #[error("a pending request from '{sender}' to '{receiver}' already exists")]
    DuplicatePending { sender: String, receiver: String },

    /// 対象が存在しない
    #[error("record '{0}' not found")]
    NotFound(String),

    /// 期待した状態と保存されている状態が一致しない
    #[error("record '{0}' was modified concurrently")]
    Conflict(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// 認証情報の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("no credential provided")]
    MissingCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

/// コラボレーションリクエストの状態遷移エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// 受信者以外が応答しようとした
    #[error("user '{0}' is not the receiver of this request")]
    Forbidden(String),

    /// pending 以外の状態からの遷移
    #[error("request is already {0}")]
    InvalidState(&'static str),
}
