//! Domain Entities
//!
//! - LocationKey: where a fragment attaches in the API surface
//! - DocumentationFragment: the documentation payload
//! - VersionSnapshot: append-only documentation version
//! - ExportRequest / ExportResult: request-scoped export values
//! - BuildContext: shared timestamp of a registration pass

mod build_context;
mod export;
mod fragment;
mod location_key;
mod snapshot;

pub use build_context::*;
pub use export::*;
pub use fragment::*;
pub use location_key::*;
pub use snapshot::*;
