//! HTTP Platform Implementation
//!
//! Talks to the hosting platform's REST management API using reqwest.
//! Parts, versions and stages are addressed under `/restapis/{api_id}`.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::entities::{
    DocumentationPart, ExportRequest, FragmentHandle, LocationKey, LocationSpec, Properties,
};
use crate::domain::errors::DomainError;
use crate::ports::DocumentationPlatform;

/// Page size requested when listing documentation parts
const PARTS_PAGE_LIMIT: u32 = 500;

/// Configuration for the HTTP platform client
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Management API base URL
    pub base_url: String,
    /// Bearer token sent with every call (optional)
    pub token: Option<String>,
    /// Per-call timeout; an elapsed call is a transient failure
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl PlatformConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("apidocs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP implementation of DocumentationPlatform
pub struct HttpPlatform {
    client: Client,
    config: PlatformConfig,
}

// ============================================
// Wire Types
// ============================================

#[derive(Serialize)]
struct CreatePartBody<'a> {
    location: &'a LocationKey,
    /// The platform stores properties as a JSON-encoded string
    properties: String,
}

#[derive(Deserialize)]
struct PartBody {
    id: String,
    location: LocationSpec,
    #[serde(default)]
    properties: Option<String>,
}

/// Items stay raw so one part this registry cannot address does not
/// fail the whole page
#[derive(Debug, Deserialize)]
struct PartsPage {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    position: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateVersionBody<'a> {
    documentation_version: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchBody {
    patch_operations: Vec<PatchOperation>,
}

#[derive(Serialize)]
struct PatchOperation {
    op: &'static str,
    path: &'static str,
    value: String,
}

impl PatchBody {
    fn replace(path: &'static str, value: String) -> Self {
        Self {
            patch_operations: vec![PatchOperation {
                op: "replace",
                path,
                value,
            }],
        }
    }
}

#[derive(Deserialize)]
struct IdBody {
    id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "Message")]
    message: String,
}

impl PartBody {
    /// Convert to a domain part, `None` when the platform holds a part
    /// this registry cannot address
    fn into_part(self) -> Option<DocumentationPart> {
        let location = match self.location.validate() {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Skipping documentation part {}: {}", self.id, e);
                return None;
            }
        };

        let properties = match self.properties.as_deref() {
            None | Some("") => Properties::new(),
            Some(raw) => match serde_json::from_str::<Properties>(raw) {
                Ok(properties) => properties,
                Err(e) => {
                    tracing::warn!(
                        "Skipping documentation part {}: properties are not a JSON object: {}",
                        self.id,
                        e
                    );
                    return None;
                }
            },
        };

        Some(DocumentationPart {
            id: self.id,
            location,
            properties,
        })
    }
}

impl PartsPage {
    fn into_parts(self) -> Vec<DocumentationPart> {
        self.items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<PartBody>(item) {
                Ok(body) => body.into_part(),
                Err(e) => {
                    tracing::warn!("Skipping unreadable documentation part: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Map a non-success platform response onto the error taxonomy
fn classify(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string()
    } else {
        message
    };

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        DomainError::TransientPlatformError(format!("{}: {}", status.as_u16(), message))
    } else {
        DomainError::rejected(Some(status.as_u16()), message)
    }
}

fn transport_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::TransientPlatformError(format!("Platform call timed out: {e}"))
    } else {
        DomainError::TransientPlatformError(format!("Platform unreachable: {e}"))
    }
}

/// A success response whose body cannot be read is not worth retrying
fn malformed_response(what: &str, e: serde_json::Error) -> DomainError {
    DomainError::rejected(None, format!("Malformed {what} response: {e}"))
}

fn encode_properties(properties: &Properties) -> Result<String, DomainError> {
    serde_json::to_string(properties)
        .map_err(|e| DomainError::rejected(None, format!("Properties are not serializable: {e}")))
}

impl HttpPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Join the base URL with percent-encoded path segments
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.config.base_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = classify(status, &body);
        tracing::warn!("Platform call failed: {}", error);
        Err(error)
    }

    async fn fetch_parts_page(
        &self,
        api_id: &str,
        position: Option<&str>,
    ) -> Result<PartsPage, DomainError> {
        let url = self.url(&["restapis", api_id, "documentation", "parts"]);
        let mut query = vec![("limit", PARTS_PAGE_LIMIT.to_string())];
        if let Some(position) = position {
            query.push(("position", position.to_string()));
        }

        let response = self
            .send(self.request(Method::GET, &url).query(&query))
            .await?;
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| malformed_response("parts page", e))
    }
}

#[async_trait]
impl DocumentationPlatform for HttpPlatform {
    async fn create_documentation_part(
        &self,
        api_id: &str,
        location: &LocationKey,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError> {
        let url = self.url(&["restapis", api_id, "documentation", "parts"]);
        let body = CreatePartBody {
            location,
            properties: encode_properties(properties)?,
        };

        let response = self
            .send(self.request(Method::POST, &url).json(&body))
            .await?;
        let body = response.bytes().await.map_err(transport_error)?;
        let created: IdBody =
            serde_json::from_slice(&body).map_err(|e| malformed_response("create-part", e))?;

        Ok(FragmentHandle::new(created.id))
    }

    async fn update_documentation_part(
        &self,
        api_id: &str,
        part_id: &str,
        properties: &Properties,
    ) -> Result<FragmentHandle, DomainError> {
        let url = self.url(&["restapis", api_id, "documentation", "parts", part_id]);
        let body = PatchBody::replace("/properties", encode_properties(properties)?);

        self.send(self.request(Method::PATCH, &url).json(&body))
            .await?;

        Ok(FragmentHandle::new(part_id))
    }

    async fn list_documentation_parts(
        &self,
        api_id: &str,
    ) -> Result<Vec<DocumentationPart>, DomainError> {
        let mut parts = Vec::new();
        let mut position: Option<String> = None;
        let mut seen = HashSet::new();

        loop {
            let page = self.fetch_parts_page(api_id, position.as_deref()).await?;
            tracing::debug!(
                "Fetched {} documentation parts for {} (position: {:?})",
                page.items.len(),
                api_id,
                position
            );
            let next = page.position.clone();
            parts.extend(page.into_parts());

            match next {
                Some(next) if !next.is_empty() && seen.insert(next.clone()) => {
                    position = Some(next);
                }
                Some(next) if !next.is_empty() => {
                    tracing::warn!("Parts listing for {} revisited position {}", api_id, next);
                    break;
                }
                _ => break,
            }
        }

        Ok(parts)
    }

    async fn create_documentation_version(
        &self,
        api_id: &str,
        version_id: &str,
        description: &str,
    ) -> Result<(), DomainError> {
        let url = self.url(&["restapis", api_id, "documentation", "versions"]);
        let body = CreateVersionBody {
            documentation_version: version_id,
            description,
        };

        self.send(self.request(Method::POST, &url).json(&body))
            .await?;
        Ok(())
    }

    async fn update_stage_documentation_version(
        &self,
        api_id: &str,
        stage: &str,
        version_id: &str,
    ) -> Result<(), DomainError> {
        let url = self.url(&["restapis", api_id, "stages", stage]);
        let body = PatchBody::replace("/documentationVersion", version_id.to_string());

        self.send(self.request(Method::PATCH, &url).json(&body))
            .await?;
        Ok(())
    }

    async fn export_api(&self, request: &ExportRequest) -> Result<Vec<u8>, DomainError> {
        let url = self.url(&[
            "restapis",
            &request.api_id,
            "stages",
            &request.stage,
            "exports",
            &request.export_format,
        ]);

        let mut builder = self.request(Method::GET, &url);
        if request.include_documentation {
            builder = builder.query(&[("extensions", "documentation")]);
        }

        let response = self.send(builder).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        Ok(body.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}
