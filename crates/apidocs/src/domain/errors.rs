//! Domain Errors
//!
//! Error types for registry and export operations.

use thiserror::Error;

use crate::domain::value_objects::LocationType;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location fields do not match what the location type requires.
    /// Raised locally, never sent to the platform.
    #[error("Malformed location key ({location_type}): {reason}")]
    MalformedLocationKey {
        location_type: LocationType,
        reason: String,
    },

    #[error("Invalid export request: {0}")]
    InvalidExportRequest(String),

    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),

    /// The platform understood the call and refused it
    #[error("Platform rejected request{}: {message}", status_suffix(.status))]
    PlatformRejected {
        status: Option<u16>,
        message: String,
    },

    /// Network, timeout, throttling or platform availability failure
    #[error("Transient platform error: {0}")]
    TransientPlatformError(String),

    #[error("Export failed: {0}")]
    ExportFailed(#[source] Box<DomainError>),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl DomainError {
    pub fn malformed<R: Into<String>>(location_type: LocationType, reason: R) -> Self {
        Self::MalformedLocationKey {
            location_type,
            reason: reason.into(),
        }
    }

    pub fn rejected<M: Into<String>>(status: Option<u16>, message: M) -> Self {
        Self::PlatformRejected {
            status,
            message: message.into(),
        }
    }

    /// Wrap a platform error raised during export
    pub fn export_failed(cause: DomainError) -> Self {
        Self::ExportFailed(Box::new(cause))
    }

    /// Whether retrying the same call could succeed.
    /// Looks through `ExportFailed` to the platform cause.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::TransientPlatformError(_) => true,
            Self::ExportFailed(cause) => cause.is_transient(),
            _ => false,
        }
    }

    /// Raised by local validation, before any platform call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MalformedLocationKey { .. }
                | Self::InvalidExportRequest(_)
                | Self::InvalidPromotion(_)
        )
    }

    /// HTTP status the platform answered with, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::PlatformRejected { status, .. } => *status,
            Self::ExportFailed(cause) => cause.status_code(),
            _ => None,
        }
    }
}
