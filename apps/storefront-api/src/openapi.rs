//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Endpoints owned by the binary
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Product catalog and ordering backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::health::readiness_check),
    components(schemas(crate::api::health::ReadyResponse)),
    tags(
        (name = "Health", description = "Readiness of backing services")
    )
)]
struct AppDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = AppDoc::openapi();
        doc.merge(domain_storefront::ApiDoc::openapi());
        doc
    }
}
