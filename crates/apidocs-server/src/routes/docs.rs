//! Export Route - Merged OAS3 document
//!
//! Hands the platform's document through unchanged. Failures are passed
//! back as the platform reported them; no fallback document is served.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use apidocs::{DomainError, ExportResult};

use crate::AppState;

pub const EXPORT_PATH: &str = "/api-docs/api-docs.json";

/// Export the merged OAS3 document
#[utoipa::path(
    get,
    path = "/api-docs/api-docs.json",
    responses(
        (status = 200, description = "Merged OAS3 document (structure + documentation) as application/json"),
        (status = 502, description = "Platform unavailable or failed"),
        (status = 500, description = "Server misconfigured")
    ),
    tag = "Docs"
)]
pub async fn export_document(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, String)> {
    let result = state
        .export
        .export_configured()
        .await
        .map_err(error_response)?;

    Ok(into_response(result))
}

fn into_response(result: ExportResult) -> Response {
    let mut response = Response::new(Body::from(result.body));
    *response.status_mut() = StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::OK);

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    for (name, value) in result.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Dropping invalid export header {}", name),
        }
    }

    response
}

/// Status and body for a failed export.
///
/// Platform refusals keep the platform's status, transient failures become
/// 502, and a blank configured target is a server fault.
fn error_response(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::InvalidExportRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ if e.is_transient() => StatusCode::BAD_GATEWAY,
        _ => e
            .status_code()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    };

    let message = match e {
        DomainError::ExportFailed(cause) => cause.to_string(),
        other => other.to_string(),
    };

    (status, message)
}

pub fn router() -> Router<AppState> {
    Router::new().route(EXPORT_PATH, get(export_document))
}
