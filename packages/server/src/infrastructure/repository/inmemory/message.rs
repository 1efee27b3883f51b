//! InMemory MessageStore 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! Vec を追記専用のログとして使用します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, RepositoryError, UserId};

/// インメモリ MessageStore 実装
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みメッセージ数
    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message.clone());
        Ok(message)
    }

    async fn query(&self, a: &UserId, b: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let mut history: Vec<ChatMessage> = messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        drop(messages);

        // 同時刻のメッセージは追記順を保つ（安定ソート）
        history.sort_by_key(|m| m.created_at);
        Ok(history)
    }
}
