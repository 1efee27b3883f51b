//! UseCase: コラボレーションリクエスト作成
//!
//! Room トークンは作成時に払い出され、送信者にはすぐに返される。
//! 受信者がトークンを知るのは承認したときだけ。

use std::{sync::Arc, time::Duration};

use crate::domain::{CollaborationRequest, CollaborationRequestRepository, UserId};

use super::{error::CollaborationError, storage::bounded};

/// リクエスト作成のユースケース
pub struct CreateCollaborationRequestUseCase {
    repository: Arc<dyn CollaborationRequestRepository>,
    store_timeout: Duration,
}

impl CreateCollaborationRequestUseCase {
    pub fn new(
        repository: Arc<dyn CollaborationRequestRepository>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// リクエストを作成
    ///
    /// # Returns
    ///
    /// * `Ok(CollaborationRequest)` - 保存された pending リクエスト（Room トークンを含む）
    /// * `Err(CollaborationError::SelfTarget)` - 自分自身宛て
    /// * `Err(CollaborationError::DuplicatePending)` - 同じ宛先への pending が既にある
    pub async fn execute(
        &self,
        sender: UserId,
        target: UserId,
    ) -> Result<CollaborationRequest, CollaborationError> {
        if sender == target {
            return Err(CollaborationError::SelfTarget);
        }

        let request = CollaborationRequest::open(sender, target);
        bounded(self.store_timeout, self.repository.insert_pending(request.clone()))
            .await
            .map_err(|e| {
                let e = CollaborationError::from(e);
                if let CollaborationError::Storage(detail) = &e {
                    tracing::error!(
                        "Failed to store collaboration request '{}': {}",
                        request.id,
                        detail
                    );
                }
                e
            })?;

        tracing::info!(
            "Collaboration request '{}' created: '{}' -> '{}'",
            request.id,
            request.sender,
            request.receiver
        );
        Ok(request)
    }
}
