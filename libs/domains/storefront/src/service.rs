//! Storefront Service - Business logic layer

use bson::doc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{CreateOrder, CreateProduct, Order, OrderStatus, Product, RecordMeta};
use crate::repository::DocumentStore;

/// Collection holding products
pub const PRODUCT_COLLECTION: &str = "product";

/// Collection holding orders
pub const ORDER_COLLECTION: &str = "order";

/// Maximum number of products returned by a listing
pub const PRODUCT_LIST_LIMIT: i64 = 100;

/// Storefront service providing catalog and ordering operations
///
/// The service layer handles validation and domain rules, then shapes
/// stored records into API responses.
pub struct StorefrontService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> StorefrontService<S> {
    /// Create a new StorefrontService with the given store
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Confirm the store answers a minimal product read
    #[instrument(skip(self))]
    pub async fn check_store(&self) -> StorefrontResult<()> {
        self.store.list(PRODUCT_COLLECTION, doc! {}, 1).await?;
        Ok(())
    }

    /// List up to [`PRODUCT_LIST_LIMIT`] products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
        let records = self
            .store
            .list(PRODUCT_COLLECTION, doc! {}, PRODUCT_LIST_LIMIT)
            .await?;

        records.iter().map(Product::from_document).collect()
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_slug = %input.slug))]
    pub async fn create_product(&self, input: CreateProduct) -> StorefrontResult<Product> {
        input.validate()?;

        let record = bson::to_document(&input)?;
        let stored = self.store.create(PRODUCT_COLLECTION, record).await?;
        let meta = RecordMeta::from_document(&stored)?;

        Ok(Product::from_input(input, meta))
    }

    /// Create a new order in the pending state
    #[instrument(skip(self, input), fields(item_count = input.items.len()))]
    pub async fn create_order(&self, input: CreateOrder) -> StorefrontResult<Order> {
        if input.items.is_empty() {
            return Err(StorefrontError::NoItems);
        }
        input.validate()?;

        let mut record = bson::to_document(&input)?;
        record.insert("status", OrderStatus::Pending.to_string());

        let stored = self.store.create(ORDER_COLLECTION, record).await?;
        let meta = RecordMeta::from_document(&stored)?;

        Ok(Order::from_input(input, meta))
    }
}

impl<S: DocumentStore> Clone for StorefrontService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
