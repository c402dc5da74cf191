//! API Documentation Registry
//!
//! Keeps documentation fragments attached to exact locations of a REST API
//! surface, snapshots them into versions, and exports the merged OpenAPI 3.0
//! document produced by the hosting platform.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): location keys, fragments, snapshots,
//!   export envelopes and the error taxonomy
//! - **Ports** (`ports/`): the hosting platform interface
//! - **Application** (`application/`): fragment store, snapshot manager,
//!   export pipeline and the registration pass
//! - **Adapters** (`adapters/`): reqwest-backed platform client
//! - **Catalog** (`catalog/`): documentation of the todo API
//!
//! # Usage
//!
//! ```rust,ignore
//! use apidocs::{ExportConfig, ExportPipeline, HttpPlatform, PlatformConfig};
//!
//! let platform = Arc::new(HttpPlatform::new(PlatformConfig::new(base_url)));
//! let pipeline = ExportPipeline::new(platform, ExportConfig::new("abc123", "prod"));
//! let result = pipeline.export_configured().await?;
//! ```

pub mod adapters;
pub mod application;
pub mod catalog;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::{HttpPlatform, PlatformConfig};
pub use application::{
    ExportConfig, ExportPipeline, FragmentStore, RegistrationPass, RegistrationReport,
    SnapshotManager,
};
pub use domain::{
    BuildContext, DocumentationFragment, DocumentationPart, DomainError, ExportRequest,
    ExportResult, FieldRequirements, FragmentHandle, LocationKey, LocationSpec, LocationType,
    Properties, RegistrationMode, VersionPromotion, VersionSnapshot, VersionState,
    ACCESS_CONTROL_ALLOW_ORIGIN, OAS30,
};
pub use ports::DocumentationPlatform;
