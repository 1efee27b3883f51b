//! UseCase: コラボレーションリクエストへの応答（承認 / 拒否）
//!
//! ## 手順
//!
//! 1. リクエストを取得（なければ NotFound）
//! 2. エンティティ上で状態遷移（受信者以外は Forbidden、pending 以外は InvalidState）
//! 3. pending のときだけ上書きする compare-and-set で保存
//!
//! 同じリクエストへの同時応答は、どちらか一方だけが成功する。

use std::{sync::Arc, time::Duration};

use crate::domain::{
    CollaborationRequest, CollaborationRequestRepository, Decision, RequestId, UserId,
};

use super::{error::CollaborationError, storage::bounded};

pub struct RespondCollaborationRequestUseCase {
    repository: Arc<dyn CollaborationRequestRepository>,
    store_timeout: Duration,
}

impl RespondCollaborationRequestUseCase {
    pub fn new(
        repository: Arc<dyn CollaborationRequestRepository>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// 応答を実行し、遷移後のリクエストを返す
    ///
    /// 承認時の Room トークンは返り値の `room_token()` から取得する。
    pub async fn execute(
        &self,
        actor: &UserId,
        request_id: &RequestId,
        decision: Decision,
    ) -> Result<CollaborationRequest, CollaborationError> {
        let mut request = bounded(self.store_timeout, self.repository.find_by_id(request_id))
            .await?
            .ok_or(CollaborationError::NotFound)?;

        request.respond(actor, decision)?;

        bounded(self.store_timeout, self.repository.replace_pending(request.clone()))
            .await
            .map_err(|e| {
                tracing::warn!("Failed to update collaboration request '{}': {}", request_id, e);
                CollaborationError::from(e)
            })?;

        tracing::info!(
            "Collaboration request '{}' {} by '{}'",
            request.id,
            request.status.as_str(),
            actor
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockCollaborationRequestRepository, RequestStatus},
        infrastructure::repository::InMemoryCollaborationRequestRepository,
    };

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    async fn setup() -> (
        RespondCollaborationRequestUseCase,
        Arc<InMemoryCollaborationRequestRepository>,
        CollaborationRequest,
    ) {
        let repository = Arc::new(InMemoryCollaborationRequestRepository::new());
        let request = CollaborationRequest::open(user("alice"), user("bob"));
        repository.insert_pending(request.clone()).await.unwrap();
        let usecase =
            RespondCollaborationRequestUseCase::new(repository.clone(), Duration::from_secs(1));
        (usecase, repository, request)
    }

    #[tokio::test]
    async fn test_accept_returns_room_token_issued_at_creation() {
        // テスト項目: 承認すると accepted になり、作成時と同じ Room トークンが返る
        // given (前提条件):
        let (usecase, repository, request) = setup().await;

        // when (操作):
        let accepted = usecase
            .execute(&user("bob"), &request.id, Decision::Accept)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(accepted.status, RequestStatus::Accepted);
        assert_eq!(accepted.room_token(), request.room_token());
        let stored = repository.find_by_id(&request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Accepted);
    }

    #[tokio::test]
    async fn test_reject_then_accept_is_invalid_state() {
        // テスト項目: 終端状態のリクエストへの再応答は InvalidState
        // given (前提条件):
        let (usecase, _, request) = setup().await;
        usecase
            .execute(&user("bob"), &request.id, Decision::Reject)
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(&user("bob"), &request.id, Decision::Accept)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CollaborationError::InvalidState("rejected".to_string()))
        );
    }

    #[tokio::test]
    async fn test_non_receiver_is_forbidden() {
        // テスト項目: 受信者以外（送信者本人を含む）の応答は Forbidden
        // given (前提条件):
        let (usecase, repository, request) = setup().await;

        // when (操作):
        let by_sender = usecase
            .execute(&user("alice"), &request.id, Decision::Accept)
            .await;
        let by_stranger = usecase
            .execute(&user("carol"), &request.id, Decision::Reject)
            .await;

        // then (期待する結果):
        assert_eq!(by_sender, Err(CollaborationError::Forbidden));
        assert_eq!(by_stranger, Err(CollaborationError::Forbidden));
        let stored = repository.find_by_id(&request.id).await.unwrap().unwrap();
        assert!(stored.is_pending());
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        // テスト項目: 存在しないリクエストは NotFound
        // given (前提条件):
        let (usecase, _, _) = setup().await;

        // when (操作):
        let result = usecase
            .execute(&user("bob"), &RequestId::generate(), Decision::Accept)
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(CollaborationError::NotFound));
    }

    #[tokio::test]
    async fn test_lost_race_is_invalid_state() {
        // テスト項目: 取得後に他の応答で解決済みになっていた場合は InvalidState
        // given (前提条件):
        let request = CollaborationRequest::open(user("alice"), user("bob"));
        let snapshot = request.clone();
        let mut repository = MockCollaborationRequestRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(snapshot.clone())));
        repository.expect_replace_pending().times(1).returning(|r| {
            Err(crate::domain::RepositoryError::Conflict(
                r.id.as_str().to_string(),
            ))
        });
        let usecase =
            RespondCollaborationRequestUseCase::new(Arc::new(repository), Duration::from_secs(1));

        // when (操作):
        let result = usecase
            .execute(&user("bob"), &request.id, Decision::Accept)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CollaborationError::InvalidState("resolved".to_string()))
        );
    }
}
