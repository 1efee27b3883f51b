//! UseCase: 2 者間のチャット履歴取得
//!
//! 作成時刻の昇順で全件を返す。ページングはしない。

use std::{sync::Arc, time::Duration};

use crate::domain::{ChatMessage, MessageStore, UserId};

use super::{error::GetHistoryError, storage::bounded};

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    store: Arc<dyn MessageStore>,
    store_timeout: Duration,
}

impl GetHistoryUseCase {
    pub fn new(store: Arc<dyn MessageStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub async fn execute(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Vec<ChatMessage>, GetHistoryError> {
        bounded(self.store_timeout, self.store.query(a, b))
            .await
            .map_err(|e| {
                tracing::error!("Failed to load history between '{}' and '{}': {}", a, b, e);
                GetHistoryError::Storage(e.to_string())
            })
    }
}
