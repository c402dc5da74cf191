//! Hosting Platform Port
//!
//! The API-management service that owns the API surface tree, stores
//! documentation parts and versions, and merges structure with
//! documentation on export.

use async_trait::async_trait;

use crate::domain::entities::{
    DocumentationPart, ExportRequest, FragmentHandle, LocationKey, Properties,
};
use crate::domain::errors::DomainError;

/// Hosting platform interface
///
/// Every method is a single platform call. Implementations map semantic
/// refusals to `DomainError::PlatformRejected` and network, timeout or
/// availability failures to `DomainError::TransientPlatformError`, and never
/// retry on their own.
///
/// # Example
///
/// ```rust,ignore
/// use apidocs::ports::DocumentationPlatform;
///
/// struct GatewayPlatform { /* management API client */ }
///
/// #[async_trait]
/// impl DocumentationPlatform for GatewayPlatform {
///     async fn create_documentation_part(&self, api_id: &str, location: &LocationKey,
///         properties: &Properties) -> Result<FragmentHandle, DomainError>
///     {
///         // POST the part to the management API
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait DocumentationPlatform: Send + Sync {
    /// Store a new documentation part.
    ///
    /// Platforms that do not enforce key uniqueness create an additional
    /// part when one already exists at `location`.
    async fn create_documentation_part(
        &self,
        api_id: &str,
        location: &LocationKey,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError>;

    /// Replace the properties of an existing part
    async fn update_documentation_part(
        &self,
        api_id: &str,
        part_id: &str,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError>;

    /// All parts currently stored for the API
    async fn list_documentation_parts(
        &self,
        api_id: &str,
    ) -> Result<Vec<DocumentationPart>, DomainError>;

    /// Record a documentation version over the current parts
    async fn create_documentation_version(
        &self,
        api_id: &str,
        version_id: &str,
        description: &str,
    ) -> Result<(), DomainError>;

    /// Make `version_id` the documentation version served by `stage`
    async fn update_stage_documentation_version(
        &self,
        api_id: &str,
        stage: &str,
        version_id: &str,
    ) -> Result<(), DomainError>;

    /// Export the merged document for a stage, bytes as produced
    async fn export_api(&self, request: &ExportRequest) -> Result<Vec<u8>, DomainError>;

    /// Platform name for logs (e.g., "http", "memory")
    fn name(&self) -> &str;
}
