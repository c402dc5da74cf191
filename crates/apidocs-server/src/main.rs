use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod routes;

use apidocs::{DocumentationPlatform, ExportPipeline, HttpPlatform};
use config::ServerConfig;

/// Export pipeline over whichever platform adapter the server was built with
pub type AppExportPipeline = ExportPipeline<dyn DocumentationPlatform>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub export: Arc<AppExportPipeline>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is running", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "API docs server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn build_router(state: AppState) -> Router {
    // OpenAPI documentation of this server
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::docs::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📚 API docs server initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key))?;

    let platform: Arc<dyn DocumentationPlatform> =
        Arc::new(HttpPlatform::new(config.platform.clone()));
    tracing::info!(
        "🔌 Platform client ready ({}, timeout {:?})",
        config.platform.base_url,
        config.platform.timeout
    );

    let export = Arc::new(ExportPipeline::new(platform, config.export.clone()));
    tracing::info!(
        "📤 Exporting {} at stage {}",
        config.export.api_id,
        config.export.stage
    );

    let router = build_router(AppState { export });

    tracing::info!("📖 Swagger UI: /swagger-ui");
    tracing::info!("✅ API docs server ready - {}", routes::docs::EXPORT_PATH);

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs::adapters::InMemoryPlatform;
    use apidocs::ExportConfig;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let platform: Arc<dyn DocumentationPlatform> =
            Arc::new(InMemoryPlatform::new().with_document(r#"{"openapi":"3.0.1"}"#));
        build_router(AppState {
            export: Arc::new(ExportPipeline::new(platform, ExportConfig::new("abc123", "prod"))),
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_export_has_single_cors_header_behind_layers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(routes::docs::EXPORT_PATH)
                    .header("Origin", "https://docs.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let values: Vec<_> = response
            .headers()
            .get_all("access-control-allow-origin")
            .iter()
            .collect();
        assert_eq!(values, vec!["*"]);
    }

    #[tokio::test]
    async fn test_serves_own_openapi_document() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
