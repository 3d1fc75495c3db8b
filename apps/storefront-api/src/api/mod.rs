//! API routes module
//!
//! This module defines all HTTP API routes for the Storefront API.

pub mod health;
pub mod storefront;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are mounted at the root by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(storefront::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::{MongoConfig, build_client};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// State pointing at a port nothing listens on
    async fn unreachable_state() -> AppState {
        let mongodb = MongoConfig::with_database("mongodb://127.0.0.1:1", "appdb")
            .with_server_selection_timeout(1);
        let mongo_client = build_client(&mongodb).await.unwrap();
        let db = mongo_client.database(mongodb.database());

        AppState {
            config: Config {
                app: app_info!(),
                mongodb,
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            mongo_client,
            db,
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_store() {
        let app = routes(&unreachable_state().await);

        let (status, body) = get_json(app, "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_ready_is_503_when_store_unreachable() {
        let app = routes(&unreachable_state().await);

        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["mongodb"], false);
    }

    #[tokio::test]
    async fn test_products_fail_with_database_error_when_store_unreachable() {
        let app = routes(&unreachable_state().await);

        let (status, body) = get_json(app, "/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
    }
}
