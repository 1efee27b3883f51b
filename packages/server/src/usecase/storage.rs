//! 永続ストア呼び出しのタイムアウト

use std::{future::Future, time::Duration};

use crate::domain::RepositoryError;

/// ストア呼び出しを `timeout` で打ち切る。経過した場合は `RepositoryError::Timeout`
pub(crate) async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| RepositoryError::Timeout(timeout.as_millis()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_through_result() {
        // テスト項目: 時間内に完了した呼び出しの結果はそのまま返る
        let result = bounded(Duration::from_millis(100), async { Ok::<_, RepositoryError>(7) }).await;

        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        // テスト項目: 時間内に完了しない呼び出しは Timeout
        let result = bounded(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, RepositoryError>(())
        })
        .await;

        assert_eq!(result, Err(RepositoryError::Timeout(20)));
    }
}
