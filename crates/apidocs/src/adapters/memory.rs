//! In-memory platform
//!
//! Records every call so tests can assert what reached the platform.
//! Versions and stage associations behave like the hosting platform:
//! duplicate version ids are rejected with 409 and promoting an unknown
//! version is rejected with 404.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{
    DocumentationPart, ExportRequest, FragmentHandle, LocationKey, Properties,
};
use crate::domain::errors::DomainError;
use crate::ports::DocumentationPlatform;

/// Failure the in-memory platform answers every call with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformFailure {
    Rejected { status: u16, message: String },
    Transient(String),
}

impl PlatformFailure {
    fn to_error(&self) -> DomainError {
        match self {
            Self::Rejected { status, message } => DomainError::rejected(Some(*status), message),
            Self::Transient(message) => DomainError::TransientPlatformError(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVersion {
    pub version_id: String,
    pub description: String,
}

#[derive(Default)]
pub struct InMemoryPlatform {
    calls: AtomicUsize,
    next_id: AtomicUsize,
    parts: Mutex<Vec<DocumentationPart>>,
    versions: Mutex<Vec<RecordedVersion>>,
    stages: Mutex<HashMap<String, String>>,
    exports: Mutex<Vec<ExportRequest>>,
    document: Mutex<Vec<u8>>,
    failure: Mutex<Option<PlatformFailure>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document returned by `export_api`
    pub fn with_document(self, document: impl Into<Vec<u8>>) -> Self {
        *lock(&self.document) = document.into();
        self
    }

    pub fn with_failure(self, failure: PlatformFailure) -> Self {
        self.fail_with(Some(failure));
        self
    }

    /// Set or clear the failure every subsequent call answers with
    pub fn fail_with(&self, failure: Option<PlatformFailure>) {
        *lock(&self.failure) = failure;
    }

    /// Number of platform calls received, including failed ones
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn parts(&self) -> Vec<DocumentationPart> {
        lock(&self.parts).clone()
    }

    pub fn versions(&self) -> Vec<RecordedVersion> {
        lock(&self.versions).clone()
    }

    pub fn exports(&self) -> Vec<ExportRequest> {
        lock(&self.exports).clone()
    }

    /// Version currently associated with `stage`
    pub fn stage_version(&self, stage: &str) -> Option<String> {
        lock(&self.stages).get(stage).cloned()
    }

    fn begin_call(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentationPlatform for InMemoryPlatform {
    async fn create_documentation_part(
        &self,
        _api_id: &str,
        location: &LocationKey,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError> {
        self.begin_call()?;
        let id = format!("part-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        lock(&self.parts).push(DocumentationPart {
            id: id.clone(),
            location: location.clone(),
            properties: properties.clone(),
        });
        Ok(FragmentHandle::new(id))
    }

    async fn update_documentation_part(
        &self,
        _api_id: &str,
        part_id: &str,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError> {
        self.begin_call()?;
        let mut parts = lock(&self.parts);
        let part = parts
            .iter_mut()
            .find(|p| p.id == part_id)
            .ok_or_else(|| DomainError::rejected(Some(404), "Invalid Documentation part identifier specified"))?;
        part.properties = properties.clone();
        Ok(part.handle())
    }

    async fn list_documentation_parts(
        &self,
        _api_id: &str,
    ) -> Result<Vec<DocumentationPart>, DomainError> {
        self.begin_call()?;
        Ok(self.parts())
    }

    async fn create_documentation_version(
        &self,
        _api_id: &str,
        version_id: &str,
        description: &str,
    ) -> Result<(), DomainError> {
        self.begin_call()?;
        let mut versions = lock(&self.versions);
        if versions.iter().any(|v| v.version_id == version_id) {
            return Err(DomainError::rejected(
                Some(409),
                format!("Documentation version {version_id} already exists"),
            ));
        }
        versions.push(RecordedVersion {
            version_id: version_id.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    async fn update_stage_documentation_version(
        &self,
        _api_id: &str,
        stage: &str,
        version_id: &str,
    ) -> Result<(), DomainError> {
        self.begin_call()?;
        let known = lock(&self.versions)
            .iter()
            .any(|v| v.version_id == version_id);
        if !known {
            return Err(DomainError::rejected(
                Some(404),
                format!("Documentation version {version_id} not found"),
            ));
        }
        lock(&self.stages).insert(stage.to_string(), version_id.to_string());
        Ok(())
    }

    async fn export_api(&self, request: &ExportRequest) -> Result<Vec<u8>, DomainError> {
        self.begin_call()?;
        lock(&self.exports).push(request.clone());
        Ok(lock(&self.document).clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
