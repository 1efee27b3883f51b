//! UseCase: 受信した pending リクエストの一覧
//!
//! 各リクエストに送信者のプロフィールを付与する。プロフィールの取得に失敗しても
//! 一覧自体は返す（その項目の `sender_profile` は None）。

use std::{sync::Arc, time::Duration};

use crate::domain::{CollaborationRequestRepository, ReceivedRequest, UserDirectory, UserId};

use super::{error::CollaborationError, storage::bounded};

pub struct ListReceivedRequestsUseCase {
    repository: Arc<dyn CollaborationRequestRepository>,
    directory: Arc<dyn UserDirectory>,
    store_timeout: Duration,
}

impl ListReceivedRequestsUseCase {
    pub fn new(
        repository: Arc<dyn CollaborationRequestRepository>,
        directory: Arc<dyn UserDirectory>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            directory,
            store_timeout,
        }
    }

    pub async fn execute(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<ReceivedRequest>, CollaborationError> {
        let pending = bounded(
            self.store_timeout,
            self.repository.list_pending_for_receiver(receiver),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to list requests for '{}': {}", receiver, e);
            CollaborationError::from(e)
        })?;

        let mut received = Vec::with_capacity(pending.len());
        for request in pending {
            let sender_profile = match self.directory.get(&request.sender).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Failed to look up profile of '{}': {}", request.sender, e);
                    None
                }
            };
            received.push(ReceivedRequest {
                request,
                sender_profile,
            });
        }
        Ok(received)
    }
}
