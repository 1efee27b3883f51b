//! InMemory CollaborationRequestRepository 実装
//!
//! リクエストは挿入順に Vec で保持し、削除しない。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    CollaborationRequest, CollaborationRequestRepository, RepositoryError, RequestId, UserId,
};

/// インメモリ CollaborationRequestRepository 実装
#[derive(Default)]
pub struct InMemoryCollaborationRequestRepository {
    requests: Mutex<Vec<CollaborationRequest>>,
}

impl InMemoryCollaborationRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollaborationRequestRepository for InMemoryCollaborationRequestRepository {
    async fn insert_pending(&self, request: CollaborationRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.lock().await;
        let duplicate = requests.iter().any(|r| {
            r.is_pending() && r.sender == request.sender && r.receiver == request.receiver
        });
        if duplicate {
            return Err(RepositoryError::DuplicatePending {
                sender: request.sender.as_str().to_string(),
                receiver: request.receiver.as_str().to_string(),
            });
        }
        requests.push(request);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &RequestId,
    ) -> Result<Option<CollaborationRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        Ok(requests.iter().find(|r| &r.id == id).cloned())
    }

    async fn list_pending_for_receiver(
        &self,
        receiver: &UserId,
    ) -> Result<Vec<CollaborationRequest>, RepositoryError> {
        let requests = self.requests.lock().await;
        Ok(requests
            .iter()
            .filter(|r| r.is_pending() && &r.receiver == receiver)
            .cloned()
            .collect())
    }

    async fn replace_pending(&self, request: CollaborationRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.lock().await;
        let stored = requests
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or_else(|| RepositoryError::NotFound(request.id.as_str().to_string()))?;
        if !stored.is_pending() {
            return Err(RepositoryError::Conflict(request.id.as_str().to_string()));
        }
        *stored = request;
        Ok(())
    }
}
