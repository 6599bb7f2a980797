use std::future::Future;
use std::time::Duration;

use crate::core::error::Result;
use crate::shared::constants::UPSTREAM_RETRY_ATTEMPTS;

/// Base delay between retry attempts; scaled linearly per attempt
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Run an outbound call with bounded retry.
///
/// Third-party APIs fail transiently; every adapter routes its request
/// through here so the retry policy stays in one place. Only transient
/// errors (transport failures, upstream 5xx) are retried; anything else
/// returns on the first attempt. The last error is returned once the
/// attempt budget is spent.
pub async fn with_retry<T, F, Fut>(op_name: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;

    for attempt in 0..=UPSTREAM_RETRY_ATTEMPTS {
        if attempt > 0 {
            let delay = Duration::from_millis(RETRY_BASE_DELAY_MS * attempt as u64);
            tracing::warn!(
                "Retrying {} (attempt {}/{}) after {:?}",
                op_name,
                attempt + 1,
                UPSTREAM_RETRY_ATTEMPTS + 1,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => last_err = Some(e),
            Err(e) => return Err(e),
        }
    }

    // The loop always runs at least once, so last_err is set here
    Err(last_err.unwrap_or_else(|| {
        crate::core::error::AppError::Internal(format!("{}: retry loop exhausted", op_name))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let calls = AtomicU32::new(0);
        let result = with_retry("op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, AppError>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_retry("op", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AppError::ExternalServiceError("transient".to_string()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_bails_immediately() {
        let calls = AtomicU32::new(0);
        let result: crate::core::error::Result<i32> = with_retry("op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::UpstreamRejected("status 404".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::UpstreamRejected(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: crate::core::error::Result<i32> = with_retry("op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::ExternalServiceError("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), UPSTREAM_RETRY_ATTEMPTS + 1);
    }
}
