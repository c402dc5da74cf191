//! Export request/result - Transient, request-scoped values

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// OpenAPI 3.0 export format name
pub const OAS30: &str = "oas30";

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub api_id: String,
    pub stage: String,
    pub export_format: String,
    pub include_documentation: bool,
}

impl ExportRequest {
    /// OAS3 export with the documentation extension enabled
    pub fn oas30(api_id: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            stage: stage.into(),
            export_format: OAS30.to_string(),
            include_documentation: true,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.api_id.trim().is_empty() {
            return Err(DomainError::InvalidExportRequest(
                "api id must not be empty".to_string(),
            ));
        }
        if self.stage.trim().is_empty() {
            return Err(DomainError::InvalidExportRequest(
                "stage must not be empty".to_string(),
            ));
        }
        if self.export_format.trim().is_empty() {
            return Err(DomainError::InvalidExportRequest(
                "export format must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response envelope around the exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub status_code: u16,
    /// Document bytes exactly as the platform returned them
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl ExportResult {
    /// 200 response carrying `body` with cross-origin access open to all
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status_code: 200,
            body,
            headers: vec![(ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string())],
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
