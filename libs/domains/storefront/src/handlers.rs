//! HTTP handlers for the Storefront API

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        UnprocessableEntityResponse,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::StorefrontResult;
use crate::models::{
    CreateOrder, CreateProduct, CustomerInfo, Order, OrderItem, OrderStatus, Product,
};
use crate::repository::DocumentStore;
use crate::service::StorefrontService;

/// OpenAPI documentation for Storefront API
#[derive(OpenApi)]
#[openapi(
    paths(store_probe, list_products, create_product, create_order),
    components(
        schemas(
            Product, CreateProduct, Order, CreateOrder, OrderItem,
            CustomerInfo, OrderStatus, ProbeResponse
        ),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Storefront", description = "Product catalog and ordering endpoints")
    )
)]
pub struct ApiDoc;

/// Result of the store connectivity probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProbeResponse {
    /// `ok` or `error`
    pub status: String,
    /// Store error message when `status` is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Create the storefront router with all HTTP endpoints
pub fn router<S: DocumentStore + 'static>(service: StorefrontService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/test", get(store_probe))
        .route("/products", get(list_products).post(create_product))
        .route("/orders", post(create_order))
        .with_state(shared_service)
}

/// Probe the document store; failures are reported in the body
#[utoipa::path(
    get,
    path = "/test",
    tag = "Storefront",
    responses(
        (status = 200, description = "Store reachability", body = ProbeResponse)
    )
)]
async fn store_probe<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
) -> Json<ProbeResponse> {
    match service.check_store().await {
        Ok(()) => Json(ProbeResponse {
            status: "ok".to_string(),
            detail: None,
        }),
        Err(e) => {
            tracing::warn!("Store probe failed: {}", e);
            Json(ProbeResponse {
                status: "error".to_string(),
                detail: Some(e.to_string()),
            })
        }
    }
}

/// List products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Storefront",
    responses(
        (status = 200, description = "Up to 100 products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
) -> StorefrontResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Storefront",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> StorefrontResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Create a new order; it always starts as `pending`
///
/// The body is validated by the service after the empty-items check.
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Storefront",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created successfully", body = Order),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<S: DocumentStore>(
    State(service): State<Arc<StorefrontService<S>>>,
    payload: Result<Json<CreateOrder>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload.map_err(AppError::from)?;
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
