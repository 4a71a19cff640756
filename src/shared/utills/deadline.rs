//! Per-call deadline budget
//!
//! Every public service operation runs under a single configured timeout.
//! When it elapses the wrapped future is dropped, which cancels any
//! in-flight repository calls and enrichment fan-out it owns.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::shared::errors::DomainError;

/// Default budget used when no `[usecase]` timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `operation` under `budget`, mapping an elapsed deadline to
/// [`DomainError::Timeout`]. Errors from the operation pass through unchanged.
pub async fn with_deadline<T, Fut>(
    budget: Duration,
    operation_name: &str,
    operation: Fut,
) -> Result<T, DomainError>
where
    Fut: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation = operation_name,
                budget_ms = budget.as_millis() as u64,
                "Deadline exceeded"
            );
            Err(DomainError::Timeout(operation_name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_result_through() {
        let ok = with_deadline(Duration::from_millis(50), "fast", async { Ok::<_, DomainError>(7) })
            .await
            .unwrap();
        assert_eq!(ok, 7);

        let err = with_deadline(Duration::from_millis(50), "failing", async {
            Err::<(), _>(DomainError::AlreadyActive)
        })
        .await
        .unwrap_err();
        assert_eq!(err, DomainError::AlreadyActive);
    }

    #[tokio::test]
    async fn elapsed_budget_is_timeout() {
        let err = with_deadline(Duration::from_millis(10), "slow", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DomainError>(())
        })
        .await
        .unwrap_err();
        assert_eq!(err, DomainError::Timeout("slow".into()));
    }
}
