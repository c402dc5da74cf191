//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations against the hosting platform.

mod export_pipeline;
mod fragment_store;
mod registration;
mod snapshot_manager;

pub use export_pipeline::{ExportConfig, ExportPipeline};
pub use fragment_store::FragmentStore;
pub use registration::{RegistrationPass, RegistrationReport};
pub use snapshot_manager::SnapshotManager;
