//! VersionState - Whether a documentation version serves traffic

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionState {
    /// Recorded with the platform, not associated with any stage
    #[default]
    Proposed,
    /// Associated with a stage; exports of that stage use it
    Active,
}

impl std::fmt::Display for VersionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionState::Proposed => write!(f, "PROPOSED"),
            VersionState::Active => write!(f, "ACTIVE"),
        }
    }
}
