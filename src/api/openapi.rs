//! OpenAPI documentation and schema generation
//!
//! Covers the JSON/ZIP API only; the HTML form at `/` is not part of the document.

use utoipa::OpenApi;

/// OpenAPI documentation for the product-image-bundler API
///
/// The document can be accessed via:
/// - `/api/v1/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "product-image-bundler API",
        version = "0.1.0",
        description = "Bundle the product images listed in an .xlsx spreadsheet into an ordered ZIP",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8501", description = "Local development server")
    ),
    paths(
        // Bundles
        crate::api::routes::create_bundle,
        crate::api::routes::create_bundle_report,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::types::BundleReport,
            crate::types::Outcome,
            crate::types::Record,
            crate::error::ApiError,
            crate::error::ErrorDetail,
        )
    ),
    tags(
        (name = "bundles", description = "Spreadsheet to ZIP runs"),
        (name = "system", description = "Health check and API documentation")
    )
)]
pub struct ApiDoc;
