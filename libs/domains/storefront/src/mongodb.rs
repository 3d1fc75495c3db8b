//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use bson::{DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::error::StorefrontResult;
use crate::models::string_id;
use crate::repository::DocumentStore;

/// MongoDB implementation of the DocumentStore
#[derive(Clone)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    /// Create a new MongoDocumentStore over `db`
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

/// Set the string `id` next to the native `_id`
fn attach_string_id(record: &mut Document) {
    if let Some(id) = record.get("_id").map(string_id) {
        record.insert("id", id);
    }
}

/// Set both timestamps to the same instant
fn stamp_created(record: &mut Document, now: DateTime) {
    record.insert("created_at", now);
    record.insert("updated_at", now);
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, record))]
    async fn create(&self, collection: &str, mut record: Document) -> StorefrontResult<Document> {
        stamp_created(&mut record, DateTime::now());

        let result = self.collection(collection).insert_one(&record).await?;

        record.insert("_id", result.inserted_id);
        attach_string_id(&mut record);

        tracing::info!(
            collection,
            id = record.get_str("id").unwrap_or_default(),
            "Document created"
        );
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> StorefrontResult<Vec<Document>> {
        let cursor = self.collection(collection).find(filter).limit(limit).await?;
        let mut records: Vec<Document> = cursor.try_collect().await?;

        for record in &mut records {
            attach_string_id(record);
        }

        Ok(records)
    }
}
