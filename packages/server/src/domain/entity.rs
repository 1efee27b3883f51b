//! Entities
//!
//! チャットメッセージ、コラボレーションリクエスト、ユーザープロフィールを定義します。

use super::{
    error::TransitionError,
    value_object::{MessageId, MessageText, RequestId, RoomToken, Timestamp, UserId},
};

/// チャットメッセージ
///
/// 一度作成されたら変更されない。配信より前に永続化される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub from: UserId,
    pub to: UserId,
    pub text: MessageText,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(from: UserId, to: UserId, text: MessageText, created_at: Timestamp) -> Self {
        Self {
            id: MessageId::generate(),
            from,
            to,
            text,
            created_at,
        }
    }

    /// `a` と `b` の 2 者間のメッセージかどうか（送受信の向きは問わない）
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// コラボレーションリクエストの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// 受信者の応答
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    fn target_status(self) -> RequestStatus {
        match self {
            Self::Accept => RequestStatus::Accepted,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

/// コラボレーションリクエスト
///
/// ## 状態遷移
///
/// ```text
/// pending --accept--> accepted
/// pending --reject--> rejected
/// ```
///
/// accepted / rejected は終端状態。Room トークンは作成時に割り当てられ、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationRequest {
    pub id: RequestId,
    pub sender: UserId,
    pub receiver: UserId,
    pub status: RequestStatus,
    room_token: RoomToken,
}

impl CollaborationRequest {
    /// 新しい pending リクエストを作成（Room トークンを払い出す）
    pub fn open(sender: UserId, receiver: UserId) -> Self {
        Self {
            id: RequestId::generate(),
            sender,
            receiver,
            status: RequestStatus::Pending,
            room_token: RoomToken::generate(),
        }
    }

    pub fn room_token(&self) -> &RoomToken {
        &self.room_token
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// 受信者として応答する
    ///
    /// 受信者以外は `Forbidden`、pending 以外は `InvalidState`。
    pub fn respond(&mut self, actor: &UserId, decision: Decision) -> Result<(), TransitionError> {
        if actor != &self.receiver {
            return Err(TransitionError::Forbidden(actor.as_str().to_string()));
        }
        if !self.is_pending() {
            return Err(TransitionError::InvalidState(self.status.as_str()));
        }
        self.status = decision.target_status();
        Ok(())
    }
}

/// 公開プロフィール（UserDirectory から取得）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub handle: String,
    pub avatar_url: Option<String>,
}

/// 送信者プロフィール付きの受信リクエスト
///
/// プロフィールが UserDirectory に存在しない場合は `sender_profile` が None。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedRequest {
    pub request: CollaborationRequest,
    pub sender_profile: Option<UserProfile>,
}
