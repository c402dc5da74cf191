//! VersionSnapshot - Append-only marker over the documentation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::VersionState;

/// Format of version ids; lexicographic order matches creation order
const VERSION_ID_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";

/// Immutable documentation version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    pub version_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub state: VersionState,
}

impl VersionSnapshot {
    /// A proposed snapshot whose id is derived from `created_at`
    pub fn new(description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            version_id: Self::version_id_for(created_at),
            description: description.into(),
            created_at,
            state: VersionState::Proposed,
        }
    }

    pub fn version_id_for(created_at: DateTime<Utc>) -> String {
        created_at.format(VERSION_ID_FORMAT).to_string()
    }
}

/// Result of associating a version with a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPromotion {
    pub version_id: String,
    pub stage: String,
    pub state: VersionState,
    pub promoted_at: DateTime<Utc>,
}
