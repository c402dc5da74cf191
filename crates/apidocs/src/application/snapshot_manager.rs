//! Version Snapshot Manager (Use Case)
//!
//! Proposes documentation versions and, as a separate step, promotes a
//! version to the one a stage serves.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{DomainError, VersionPromotion, VersionSnapshot, VersionState};
use crate::ports::DocumentationPlatform;

/// Application service for documentation versions
pub struct SnapshotManager<P: DocumentationPlatform + ?Sized> {
    platform: Arc<P>,
    api_id: String,
    /// Creation time of the last snapshot issued by this manager
    last_issued: Mutex<Option<DateTime<Utc>>>,
}

impl<P: DocumentationPlatform + ?Sized> SnapshotManager<P> {
    pub fn new(platform: Arc<P>, api_id: impl Into<String>) -> Self {
        Self {
            platform,
            api_id: api_id.into(),
            last_issued: Mutex::new(None),
        }
    }

    pub fn api_id(&self) -> &str {
        &self.api_id
    }

    /// Creation time for the next snapshot.
    ///
    /// Millisecond precision matches the version id format, and each call
    /// moves strictly past the previous one even within one clock tick.
    fn next_created_at(&self) -> DateTime<Utc> {
        let mut last = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now().trunc_subsecs(3);
        let created_at = match *last {
            Some(previous) if now <= previous => previous + Duration::milliseconds(1),
            _ => now,
        };
        *last = Some(created_at);
        created_at
    }

    /// Create and record a new proposed snapshot.
    ///
    /// Never idempotent: every call yields a new version id. The snapshot
    /// is not associated with any stage; see [`Self::promote`].
    pub async fn create_snapshot(
        &self,
        description: impl Into<String>,
    ) -> Result<VersionSnapshot, DomainError> {
        let snapshot = VersionSnapshot::new(description, self.next_created_at());

        self.platform
            .create_documentation_version(&self.api_id, &snapshot.version_id, &snapshot.description)
            .await?;

        tracing::info!(
            "Created documentation version {} for {} (state: {})",
            snapshot.version_id,
            self.api_id,
            snapshot.state
        );

        Ok(snapshot)
    }

    /// Associate an existing version with `stage` so its exports use it
    pub async fn promote(
        &self,
        version_id: &str,
        stage: &str,
    ) -> Result<VersionPromotion, DomainError> {
        if version_id.trim().is_empty() {
            return Err(DomainError::InvalidPromotion(
                "version id must not be empty".to_string(),
            ));
        }
        if stage.trim().is_empty() {
            return Err(DomainError::InvalidPromotion(
                "stage must not be empty".to_string(),
            ));
        }

        self.platform
            .update_stage_documentation_version(&self.api_id, stage, version_id)
            .await?;

        tracing::info!(
            "Promoted documentation version {} to stage {} of {}",
            version_id,
            stage,
            self.api_id
        );

        Ok(VersionPromotion {
            version_id: version_id.to_string(),
            stage: stage.to_string(),
            state: VersionState::Active,
            promoted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryPlatform, PlatformFailure};

    #[tokio::test]
    async fn test_same_description_yields_distinct_snapshots() {
        let platform = Arc::new(InMemoryPlatform::new());
        let manager = SnapshotManager::new(platform.clone(), "abc123");

        let first = manager.create_snapshot("nightly").await.unwrap();
        let second = manager.create_snapshot("nightly").await.unwrap();

        assert_ne!(first.version_id, second.version_id);
        assert_ne!(first.created_at, second.created_at);
        assert!(first.version_id < second.version_id);
        assert_eq!(first.state, VersionState::Proposed);
        assert_eq!(platform.versions().len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_is_not_promoted_automatically() {
        let platform = Arc::new(InMemoryPlatform::new());
        let manager = SnapshotManager::new(platform.clone(), "abc123");

        manager.create_snapshot("release").await.unwrap();

        assert_eq!(platform.stage_version("prod"), None);
    }

    #[tokio::test]
    async fn test_promote_associates_version_with_stage() {
        let platform = Arc::new(InMemoryPlatform::new());
        let manager = SnapshotManager::new(platform.clone(), "abc123");

        let snapshot = manager.create_snapshot("release").await.unwrap();
        let promotion = manager.promote(&snapshot.version_id, "prod").await.unwrap();

        assert_eq!(promotion.state, VersionState::Active);
        assert_eq!(promotion.stage, "prod");
        assert_eq!(platform.stage_version("prod"), Some(snapshot.version_id));
    }

    #[tokio::test]
    async fn test_promote_unknown_version_is_rejected() {
        let platform = Arc::new(InMemoryPlatform::new());
        let manager = SnapshotManager::new(platform, "abc123");

        let err = manager.promote("19700101T000000.000Z", "prod").await.unwrap_err();

        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_promote_blank_values_fail_before_platform_call() {
        let platform = Arc::new(InMemoryPlatform::new());
        let manager = SnapshotManager::new(platform.clone(), "abc123");

        let err = manager.promote("", "prod").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidPromotion(_)));
        assert!(err.is_local());

        let err = manager.promote("20261018T093000.000Z", "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidPromotion(_)));

        assert_eq!(platform.call_count(), 0);
    }

    #[tokio::test]
    async fn test_recording_failure_surfaces() {
        let platform = Arc::new(InMemoryPlatform::new().with_failure(
            PlatformFailure::Transient("throttled".to_string()),
        ));
        let manager = SnapshotManager::new(platform, "abc123");

        let err = manager.create_snapshot("release").await.unwrap_err();

        assert!(err.is_transient());
    }
}
