//! API Docs Server Routes
//!
//! - /api-docs/api-docs.json - Merged OAS3 document of the documented API
//! - /api-docs/openapi.json - This server's own OpenAPI document
//! - /swagger-ui - Swagger UI for this server

pub mod docs;
pub mod swagger;
