//! Infrastructure Adapters
//!
//! Implementations of the platform port.

pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod memory;

// Re-exports
pub use http::{HttpPlatform, PlatformConfig};
#[cfg(any(test, feature = "testing"))]
pub use memory::{InMemoryPlatform, PlatformFailure, RecordedVersion};
