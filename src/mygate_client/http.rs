use std::{future::Future, time::Duration};

use tracing::{debug, warn};

use crate::errors::ApiResult;

/// Bounded retry schedule for outbound REST calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(10),
        }
    }
}

/// Run `op` until it succeeds, fails terminally, or the retry budget is
/// exhausted, sleeping `policy.delay` between attempts.
///
/// Only transient transport failures are retried; a remote rejection
/// (non-2xx) surfaces immediately. The attempt counter is explicit so the
/// budget is bounded no matter how the underlying call fails.
pub(crate) async fn with_retries<T, F, Fut>(
    policy: &RetryPolicy,
    label: &'static str,
    mut op: F,
) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        debug!(label, attempt, "issuing request");
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                warn!(
                    label,
                    attempt,
                    max = policy.max_retries,
                    delay = ?policy.delay,
                    %err,
                    "transient failure, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => {
                warn!(label, attempt, %err, "request failed terminally");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::errors::ApiError;

    fn no_delay(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            delay: Duration::ZERO,
        }
    }

    // A reqwest error fabricated without touching the network.
    fn transport_error() -> ApiError {
        ApiError::Transport(reqwest::Client::new().get("http://[").build().unwrap_err())
    }

    #[tokio::test]
    async fn transient_failures_exhaust_the_budget() {
        let calls = AtomicU32::new(0);
        let result: ApiResult<()> = with_retries(&no_delay(3), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transport_error()) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn remote_rejection_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: ApiResult<()> = with_retries(&no_delay(3), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(ApiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovery_mid_budget_returns_the_value() {
        let calls = AtomicU32::new(0);
        let result = with_retries(&no_delay(3), "test", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(transport_error())
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
