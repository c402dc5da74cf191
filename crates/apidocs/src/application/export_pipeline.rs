//! Export Pipeline (Use Case)
//!
//! Asks the platform for the merged OAS3 document and hands it back
//! verbatim inside a response envelope. No caching, no retries.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{DomainError, ExportRequest, ExportResult};
use crate::ports::DocumentationPlatform;

/// Target of the served export, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target API identity
    pub api_id: String,
    /// Deployment stage
    pub stage: String,
}

impl ExportConfig {
    pub fn new(api_id: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            stage: stage.into(),
        }
    }
}

/// Application service for OAS3 exports
pub struct ExportPipeline<P: DocumentationPlatform + ?Sized> {
    platform: Arc<P>,
    config: ExportConfig,
}

impl<P: DocumentationPlatform + ?Sized> ExportPipeline<P> {
    pub fn new(platform: Arc<P>, config: ExportConfig) -> Self {
        Self { platform, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export the configured API and stage
    pub async fn export_configured(&self) -> Result<ExportResult, DomainError> {
        self.export_oas3(&self.config.api_id, &self.config.stage)
            .await
    }

    /// Export `api_id` at `stage` as OAS3 with documentation merged in
    pub async fn export_oas3(&self, api_id: &str, stage: &str) -> Result<ExportResult, DomainError> {
        self.export(&ExportRequest::oas30(api_id, stage)).await
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<ExportResult, DomainError> {
        request.validate()?;

        let body = self.platform.export_api(request).await.map_err(|e| {
            tracing::warn!(
                "Export of {} ({}) via {} failed: {}",
                request.api_id,
                request.stage,
                self.platform.name(),
                e
            );
            DomainError::export_failed(e)
        })?;

        tracing::info!(
            "Exported {} document for {} ({}), {} bytes",
            request.export_format,
            request.api_id,
            request.stage,
            body.len()
        );

        Ok(ExportResult::ok(body))
    }
}
