//! Registration Pass (Use Case)
//!
//! Registers a set of fragments, then proposes one documentation version
//! over them. Every artifact of a pass shares the pass's BuildContext.

use serde::Serialize;

use super::{FragmentStore, SnapshotManager};
use crate::domain::{
    BuildContext, DocumentationFragment, DomainError, FragmentHandle, LocationKey, VersionSnapshot,
};
use crate::ports::DocumentationPlatform;

/// Outcome of a completed registration pass
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReport {
    pub registered: Vec<(LocationKey, FragmentHandle)>,
    pub snapshot: VersionSnapshot,
}

pub struct RegistrationPass<'a, P: DocumentationPlatform + ?Sized> {
    store: &'a FragmentStore<P>,
    snapshots: &'a SnapshotManager<P>,
    context: BuildContext,
}

impl<'a, P: DocumentationPlatform + ?Sized> RegistrationPass<'a, P> {
    pub fn new(
        store: &'a FragmentStore<P>,
        snapshots: &'a SnapshotManager<P>,
        context: BuildContext,
    ) -> Self {
        Self {
            store,
            snapshots,
            context,
        }
    }

    /// Description recorded on the version this pass proposes
    pub fn snapshot_description(&self) -> String {
        format!("Documentation generated at {}", self.context.stamp())
    }

    /// Register every fragment in order, then create the snapshot.
    ///
    /// Stops at the first failure. Fragments registered before it stay on
    /// the platform and no snapshot is created.
    pub async fn run(
        &self,
        fragments: Vec<DocumentationFragment>,
    ) -> Result<RegistrationReport, DomainError> {
        let total = fragments.len();
        let mut registered = Vec::with_capacity(total);

        for fragment in fragments {
            let location = fragment.location.clone();
            let handle = self.store.register_fragment(fragment).await.map_err(|e| {
                tracing::warn!(
                    "Registration pass stopped after {}/{} fragments at {}: {}",
                    registered.len(),
                    total,
                    location,
                    e
                );
                e
            })?;
            registered.push((location, handle));
        }

        let snapshot = self
            .snapshots
            .create_snapshot(self.snapshot_description())
            .await?;

        tracing::info!(
            "Registration pass complete: {} fragments, version {} proposed",
            registered.len(),
            snapshot.version_id
        );

        Ok(RegistrationReport {
            registered,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryPlatform, PlatformFailure};
    use crate::domain::{LocationType, Properties, VersionState};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn context() -> BuildContext {
        BuildContext::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
    }

    fn fragment(location: LocationKey) -> DocumentationFragment {
        DocumentationFragment::new(location, Properties::new())
    }

    #[tokio::test]
    async fn test_run_registers_then_proposes_version() {
        let platform = Arc::new(InMemoryPlatform::new());
        let store = FragmentStore::new(platform.clone(), "abc123");
        let snapshots = SnapshotManager::new(platform.clone(), "abc123");
        let pass = RegistrationPass::new(&store, &snapshots, context());

        let report = pass
            .run(vec![
                fragment(LocationKey::api()),
                fragment(LocationKey::resource("/todo").unwrap()),
            ])
            .await
            .unwrap();

        assert_eq!(report.registered.len(), 2);
        assert_eq!(report.snapshot.state, VersionState::Proposed);
        assert_eq!(
            report.snapshot.description,
            "Documentation generated at 2026-10-18T09:30:00Z"
        );
        assert_eq!(platform.parts().len(), 2);
        assert_eq!(platform.versions()[0].version_id, report.snapshot.version_id);
        assert_eq!(platform.stage_version("prod"), None);
    }

    #[tokio::test]
    async fn test_failure_stops_pass_without_snapshot() {
        let platform = Arc::new(InMemoryPlatform::new());
        let store = FragmentStore::new(platform.clone(), "abc123");
        let snapshots = SnapshotManager::new(platform.clone(), "abc123");
        let pass = RegistrationPass::new(&store, &snapshots, context());

        platform.fail_with(Some(PlatformFailure::Rejected {
            status: 400,
            message: "Invalid location".to_string(),
        }));
        let err = pass
            .run(vec![fragment(
                LocationKey::scoped(LocationType::RequestHeader, "/todo", "GET", "Authorization")
                    .unwrap(),
            )])
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(400));
        assert!(platform.versions().is_empty());
    }
}
