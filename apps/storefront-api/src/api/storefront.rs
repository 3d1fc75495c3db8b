//! Storefront API routes
//!
//! This module wires up the storefront domain to HTTP routes.

use axum::Router;
use domain_storefront::{MongoDocumentStore, StorefrontService, handlers};

use crate::state::AppState;

/// Create storefront router
pub fn router(state: &AppState) -> Router {
    let store = MongoDocumentStore::new(&state.db);
    let service = StorefrontService::new(store);

    handlers::router(service)
}
