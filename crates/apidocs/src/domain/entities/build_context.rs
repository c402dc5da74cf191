//! BuildContext - One coherent timestamp per registration pass

use chrono::{DateTime, SecondsFormat, Utc};

/// Values shared by every artifact produced in one registration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    pub timestamp: DateTime<Utc>,
}

impl BuildContext {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Capture the current time once
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Timestamp as it appears in generated descriptions
    pub fn stamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
