//! Storefront Domain
//!
//! Product catalog and ordering over a schemaless document store (MongoDB).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, domain rules, response shaping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← Named collections (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, document normalization
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_storefront::{handlers, MongoDocumentStore, StorefrontService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("appdb");
//!
//! let store = MongoDocumentStore::new(&db);
//! let service = StorefrontService::new(store);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{StorefrontError, StorefrontResult};
pub use handlers::{ApiDoc, ProbeResponse};
pub use models::{
    CreateOrder, CreateProduct, CustomerInfo, Order, OrderItem, OrderStatus, Product, RecordMeta,
};
pub use crate::mongodb::MongoDocumentStore;
pub use repository::{DEFAULT_LIST_LIMIT, DocumentStore};
pub use service::{ORDER_COLLECTION, PRODUCT_COLLECTION, PRODUCT_LIST_LIMIT, StorefrontService};
