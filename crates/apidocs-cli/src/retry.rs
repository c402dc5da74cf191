//! Export retry with exponential backoff
//!
//! Only transient platform failures are retried. Rejections and local
//! validation errors surface on the first attempt.

use std::time::Duration;

use apidocs::{DocumentationPlatform, DomainError, ExportPipeline, ExportResult};

const RETRY_BASE_DELAY_MS: u64 = 500;
const RETRY_MAX_DELAY_MS: u64 = 8_000;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: RETRY_MAX_DELAY_MS,
        }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        Duration::from_millis(
            self.base_delay_ms
                .saturating_mul(factor)
                .min(self.max_delay_ms),
        )
    }
}

pub async fn export_with_retry<P: DocumentationPlatform + ?Sized>(
    pipeline: &ExportPipeline<P>,
    policy: RetryPolicy,
) -> Result<ExportResult, DomainError> {
    let mut attempt = 0;
    loop {
        match pipeline.export_configured().await {
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    "Export attempt {} failed ({}), retrying in {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs::adapters::{InMemoryPlatform, PlatformFailure};
    use apidocs::ExportConfig;
    use std::sync::Arc;

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay_ms: 1,
            max_delay_ms: 2,
        }
    }

    fn pipeline(platform: Arc<InMemoryPlatform>) -> ExportPipeline<InMemoryPlatform> {
        ExportPipeline::new(platform, ExportConfig::new("abc123", "prod"))
    }

    #[test]
    fn test_delay_doubles_up_to_cap() {
        let policy = RetryPolicy::new(5);
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(10), Duration::from_millis(8_000));
        assert_eq!(policy.delay_for(200), Duration::from_millis(8_000));
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let platform = Arc::new(
            InMemoryPlatform::new()
                .with_document(b"{}".to_vec())
                .with_failure(PlatformFailure::Transient("throttled".to_string())),
        );

        let err = export_with_retry(&pipeline(platform.clone()), fast(2))
            .await
            .unwrap_err();

        assert!(err.is_transient());
        assert_eq!(platform.call_count(), 3);
    }

    #[tokio::test]
    async fn test_rejections_are_not_retried() {
        let platform = Arc::new(InMemoryPlatform::new().with_failure(PlatformFailure::Rejected {
            status: 404,
            message: "Invalid stage identifier specified".to_string(),
        }));

        let err = export_with_retry(&pipeline(platform.clone()), fast(3))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        assert_eq!(platform.call_count(), 1);
    }

    #[tokio::test]
    async fn test_success_returns_document() {
        let platform = Arc::new(InMemoryPlatform::new().with_document(b"{}".to_vec()));

        let result = export_with_retry(&pipeline(platform), fast(3)).await.unwrap();

        assert_eq!(result.body, b"{}");
    }
}
