//! OpenAPI Documentation
//!
//! This server's own endpoints, documented with utoipa.

use utoipa::OpenApi;

use crate::HealthCheck;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        super::docs::export_document,
    ),
    info(
        title = "API Docs Server",
        version = "0.2.0",
        description = "Serves the merged OpenAPI 3.0 document of the documented API.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Docs", description = "Merged API documentation"),
    ),
    components(schemas(HealthCheck)),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_export_endpoint() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api-docs/api-docs.json"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
