//! HTTP server module
//!
//! Serves the upload form and result page at `/`, plus a small JSON/ZIP API under
//! `/api/v1` described by an OpenAPI 3 document. Every request is an independent
//! run; nothing is kept between requests.

use crate::{ImageBundler, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the router with all route definitions
///
/// # Routes
///
/// ## Browser
/// - `GET /` - Upload form
/// - `POST /` - Run a spreadsheet and render the log plus download link
///
/// ## API (`/api/v1`)
/// - `POST /bundles` - Run a spreadsheet and return the ZIP
/// - `POST /bundles/report` - Run a spreadsheet and return outcomes as JSON
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
///
/// `GET /swagger-ui` serves interactive documentation when enabled.
pub fn create_router(bundler: Arc<ImageBundler>) -> Router {
    let config = bundler.config.clone();
    let state = AppState::new(bundler, config.clone());

    let api = Router::new()
        .route("/bundles", post(routes::create_bundle))
        .route("/bundles/report", post(routes::create_bundle_report))
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec));

    let router = Router::new()
        .route("/", get(routes::upload_form).post(routes::submit_upload))
        .nest("/api/v1", api);

    // Swagger gets its own document path so it doesn't collide with /api/v1/openapi.json
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.api.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` or an empty list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the server on the configured bind address
///
/// Runs until the listener fails. Use [`start_api_server_with_shutdown`] to
/// stop on a signal.
///
/// # Example
///
/// ```no_run
/// use product_image_bundler::{Config, ImageBundler};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let bundler = Arc::new(ImageBundler::new(Config::default())?);
/// product_image_bundler::api::start_api_server(bundler).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(bundler: Arc<ImageBundler>) -> Result<()> {
    start_api_server_with_shutdown(bundler, std::future::pending()).await
}

/// Start the server and stop gracefully once `shutdown` resolves
///
/// In-flight requests are allowed to finish before this returns.
pub async fn start_api_server_with_shutdown<F>(bundler: Arc<ImageBundler>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = bundler.config.server.api.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(bundler);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().map_err(crate::error::Error::Io)?,
        "API server listening"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
