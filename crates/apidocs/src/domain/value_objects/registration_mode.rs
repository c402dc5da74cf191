//! RegistrationMode - What `register` does when a key already has a fragment

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// Always create a new part. Re-running a registration pass duplicates
    /// fragments on platforms that do not enforce key uniqueness.
    #[default]
    Append,
    /// Update the part already stored under the same location key,
    /// create one only when none exists.
    Upsert,
}

impl std::fmt::Display for RegistrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationMode::Append => write!(f, "append"),
            RegistrationMode::Upsert => write!(f, "upsert"),
        }
    }
}

impl std::str::FromStr for RegistrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(RegistrationMode::Append),
            "upsert" => Ok(RegistrationMode::Upsert),
            _ => Err(format!("Unknown registration mode: {}", s)),
        }
    }
}
