//! UseCase: メッセージ送信処理（ChatDeliveryService）
//!
//! ## 手順
//!
//! 1. HTTP 経路では本文が空でないことを検証
//! 2. MessageStore に永続化（失敗したらここで終了し、以降は何もしない）
//! 3. 受信者が Presence に登録されていれば receiveMessage を push
//!    （push の失敗はログに残して握りつぶす）
//! 4. 永続化したメッセージを返す
//!
//! 永続化が完了するまで Presence は参照しない。push されたメッセージは必ず履歴から取得できる。

use std::{sync::Arc, time::Duration};

use duet_shared::time::Clock;

use crate::{
    domain::{
        ChatMessage, MessagePusher, MessageStore, MessageText, PresenceRegistry, Timestamp, UserId,
    },
    infrastructure::dto::websocket::{ServerEvent, StoredMessageDto},
};

use super::{error::SendMessageError, storage::bounded};

/// 送信経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOrigin {
    /// HTTP API（本文の検証あり）
    Api,
    /// WebSocket の sendMessage イベント（検証なし）
    Socket,
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    /// 永続化されたメッセージ
    pub message: ChatMessage,
    /// 受信者に push できたかどうか
    pub pushed: bool,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    store: Arc<dyn MessageStore>,
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl SendMessageUseCase {
    pub fn new(
        store: Arc<dyn MessageStore>,
        presence: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            presence,
            message_pusher,
            clock,
            store_timeout,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(SendOutcome)` - 永続化済みのメッセージ（受信者がオフラインでも成功）
    /// * `Err(SendMessageError)` - 検証エラーまたは永続化の失敗
    pub async fn execute(
        &self,
        from: UserId,
        to: UserId,
        text: MessageText,
        origin: SendOrigin,
    ) -> Result<SendOutcome, SendMessageError> {
        // 1. 検証
        if origin == SendOrigin::Api && text.is_empty() {
            return Err(SendMessageError::Validation(
                "Message text is required".to_string(),
            ));
        }

        // 2. 永続化
        let draft = ChatMessage::new(from, to, text, Timestamp::new(self.clock.now_millis()));
        let message = bounded(self.store_timeout, self.store.append(draft))
            .await
            .map_err(|e| {
                tracing::error!("Failed to store message: {}", e);
                SendMessageError::Storage(e.to_string())
            })?;

        // 3. 受信者がオンラインなら push
        let pushed = self.push_to_recipient(&message).await;

        Ok(SendOutcome { message, pushed })
    }

    async fn push_to_recipient(&self, message: &ChatMessage) -> bool {
        let Some(connection_id) = self.presence.lookup(&message.to).await else {
            tracing::debug!(
                "Recipient '{}' is offline, message '{}' stored for later fetch",
                message.to,
                message.id.as_str()
            );
            return false;
        };

        let payload = match ServerEvent::ReceiveMessage(StoredMessageDto::from(message.clone()))
            .to_json()
        {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to encode message '{}': {}", message.id.as_str(), e);
                return false;
            }
        };

        match self.message_pusher.push_to(&connection_id, &payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to push message '{}' to '{}': {}",
                    message.id.as_str(),
                    message.to,
                    e
                );
                false
            }
        }
    }
}
