use async_trait::async_trait;
use bson::Document;

use crate::error::StorefrontResult;

/// Result cap used when a caller has no specific limit in mind
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Generic create/read access to named collections of documents
///
/// Implementations own identifier and timestamp assignment; callers never
/// supply `_id`, `id`, `created_at` or `updated_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `record` into `collection`.
    ///
    /// Stamps `created_at` and `updated_at` with the same instant, then
    /// returns the record with the native `_id` and its string form `id`.
    async fn create(&self, collection: &str, record: Document) -> StorefrontResult<Document>;

    /// Up to `limit` records matching `filter` (empty matches all), each with
    /// a string `id`, in the store's natural order.
    async fn list(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> StorefrontResult<Vec<Document>>;
}
