//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, TransitionError};

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// 入力不正（HTTP 経路の空メッセージなど）
    #[error("{0}")]
    Validation(String),

    /// 永続化の失敗（このとき配信は行われない）
    #[error("failed to store message: {0}")]
    Storage(String),
}

/// 履歴取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetHistoryError {
    #[error("failed to load chat history: {0}")]
    Storage(String),
}

/// コラボレーションリクエストのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaborationError {
    #[error("{0}")]
    Validation(String),

    #[error("Cannot send collaboration request to yourself")]
    SelfTarget,

    #[error("Collaboration request already sent")]
    DuplicatePending,

    #[error("Collaboration request not found")]
    NotFound,

    #[error("Not authorized to respond to this request")]
    Forbidden,

    #[error("Collaboration request is already {0}")]
    InvalidState(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for CollaborationError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::DuplicatePending { .. } => Self::DuplicatePending,
            RepositoryError::NotFound(_) => Self::NotFound,
            RepositoryError::Conflict(_) => Self::InvalidState("resolved".to_string()),
            RepositoryError::Storage(_) | RepositoryError::Timeout(_) => {
                Self::Storage(e.to_string())
            }
        }
    }
}

impl From<TransitionError> for CollaborationError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::Forbidden(_) => Self::Forbidden,
            TransitionError::InvalidState(status) => Self::InvalidState(status.to_string()),
        }
    }
}
