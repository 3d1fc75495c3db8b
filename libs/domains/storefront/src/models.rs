use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};

/// Currency applied when a request or stored record omits one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Lowercase alphanumeric words joined by single hyphens
static URL_SAFE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// Custom validator for product slugs
fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if !URL_SAFE_SLUG.is_match(slug) {
        return Err(validator::ValidationError::new("invalid_slug"));
    }
    Ok(())
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_quantity() -> i32 {
    1
}

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    /// Every order starts here; no transitions exist yet
    #[default]
    Pending,
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier in string form
    pub id: String,
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
    pub description: String,
    pub price: f64,
    /// 3-letter currency code
    pub currency: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1), custom(function = "validate_slug"))]
    pub slug: String,
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    #[schema(default = "USD")]
    pub currency: String,
    #[validate(url)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    #[schema(default = 1)]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
}

/// Buyer details embedded in an order
///
/// Missing `name` or `email` deserialize as empty strings and fail validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerInfo {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// DTO for creating a new order
///
/// Fields outside this shape, `status` included, are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    pub total: f64,
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3))]
    #[schema(default = "USD")]
    pub currency: String,
    #[validate(nested)]
    pub customer: CustomerInfo,
}

/// Order as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub currency: String,
    pub customer: CustomerInfo,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identifier and timestamps the store assigned to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Portable string form of a native identifier.
///
/// ObjectIds render as 24 hex characters; anything else uses its display form.
pub fn string_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn decode_err(key: &str, err: impl std::fmt::Display) -> StorefrontError {
    StorefrontError::Decode(format!("field '{}': {}", key, err))
}

fn required_str(doc: &Document, key: &str) -> StorefrontResult<String> {
    doc.get_str(key)
        .map(str::to_string)
        .map_err(|e| decode_err(key, e))
}

/// Missing and null both read as `None`
fn optional_str(doc: &Document, key: &str) -> StorefrontResult<Option<String>> {
    match doc.get(key) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(decode_err(
            key,
            format!("expected string, got {:?}", other.element_type()),
        )),
    }
}

fn required_datetime(doc: &Document, key: &str) -> StorefrontResult<DateTime<Utc>> {
    doc.get_datetime(key)
        .map(|dt| dt.to_chrono())
        .map_err(|e| decode_err(key, e))
}

fn price(doc: &Document) -> StorefrontResult<f64> {
    match doc.get("price") {
        None | Some(Bson::Null) => Ok(0.0),
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        Some(other) => Err(decode_err(
            "price",
            format!("expected number, got {:?}", other.element_type()),
        )),
    }
}

fn tags(doc: &Document) -> StorefrontResult<Vec<String>> {
    match doc.get("tags") {
        None | Some(Bson::Null) => Ok(Vec::new()),
        Some(Bson::Array(values)) => values
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| decode_err("tags", "expected array of strings"))
            })
            .collect(),
        Some(other) => Err(decode_err(
            "tags",
            format!("expected array, got {:?}", other.element_type()),
        )),
    }
}

fn featured(doc: &Document) -> StorefrontResult<bool> {
    match doc.get("featured") {
        None | Some(Bson::Null) => Ok(false),
        Some(Bson::Boolean(b)) => Ok(*b),
        Some(other) => Err(decode_err(
            "featured",
            format!("expected bool, got {:?}", other.element_type()),
        )),
    }
}

impl RecordMeta {
    /// Read the identifier and timestamps off a stored record.
    ///
    /// Prefers the string `id` the store adds, falling back to `_id`.
    pub fn from_document(doc: &Document) -> StorefrontResult<Self> {
        let id = match doc.get("id").or_else(|| doc.get("_id")) {
            Some(id) => string_id(id),
            None => return Err(decode_err("_id", "missing identifier")),
        };

        Ok(Self {
            id,
            created_at: required_datetime(doc, "created_at")?,
            updated_at: required_datetime(doc, "updated_at")?,
        })
    }
}

impl Product {
    /// Normalize a stored record into the API shape, filling defaults for
    /// fields older records may lack.
    pub fn from_document(doc: &Document) -> StorefrontResult<Self> {
        let meta = RecordMeta::from_document(doc)?;

        Ok(Self {
            id: meta.id,
            name: required_str(doc, "name")?,
            slug: required_str(doc, "slug")?,
            description: required_str(doc, "description")?,
            price: price(doc)?,
            currency: optional_str(doc, "currency")?.unwrap_or_else(default_currency),
            image: optional_str(doc, "image")?,
            tags: tags(doc)?,
            featured: featured(doc)?,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        })
    }

    /// Build the response for a freshly stored product
    pub fn from_input(input: CreateProduct, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            name: input.name,
            slug: input.slug,
            description: input.description,
            price: input.price,
            currency: input.currency,
            image: input.image,
            tags: input.tags,
            featured: input.featured,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}

impl Order {
    /// Build the response for a freshly stored order; status is always pending
    pub fn from_input(input: CreateOrder, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            items: input.items,
            total: input.total,
            currency: input.currency,
            customer: input.customer,
            status: OrderStatus::Pending,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use bson::oid::ObjectId;

    fn stored_product() -> Document {
        let now = bson::DateTime::now();
        let oid = ObjectId::new();
        doc! {
            "_id": oid,
            "id": oid.to_hex(),
            "name": "Desk Lamp",
            "slug": "desk-lamp",
            "description": "Warm light",
            "price": 24.5,
            "currency": "EUR",
            "image": "https://cdn.example.com/lamp.png",
            "tags": ["home", "light"],
            "featured": true,
            "created_at": now,
            "updated_at": now,
        }
    }

    fn product_input(json: serde_json::Value) -> CreateProduct {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_create_product_defaults() {
        let input = product_input(serde_json::json!({
            "name": "Desk Lamp",
            "slug": "desk-lamp",
            "description": "Warm light",
            "price": 24.5
        }));

        assert_eq!(input.currency, "USD");
        assert!(input.tags.is_empty());
        assert!(!input.featured);
        assert!(input.image.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_bad_fields() {
        let input = product_input(serde_json::json!({
            "name": "",
            "slug": "Desk Lamp",
            "description": "",
            "price": -1.0,
            "currency": "EURO",
            "image": "not a url"
        }));

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "slug", "price", "currency", "image"] {
            assert!(fields.contains_key(field), "expected error on {}", field);
        }
        assert!(!fields.contains_key("description"));
    }

    #[test]
    fn test_slug_pattern() {
        assert!(validate_slug("desk-lamp-2").is_ok());
        assert!(validate_slug("lamp").is_ok());
        assert!(validate_slug("-lamp").is_err());
        assert!(validate_slug("desk--lamp").is_err());
        assert!(validate_slug("Desk-Lamp").is_err());
    }

    #[test]
    fn test_order_item_quantity_defaults_to_one() {
        let item: OrderItem =
            serde_json::from_value(serde_json::json!({"product_id": "p1", "unit_price": 3.0}))
                .unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_create_order_validates_nested_fields() {
        let order: CreateOrder = serde_json::from_value(serde_json::json!({
            "items": [{"product_id": "p1", "quantity": 0, "unit_price": 3.0}],
            "total": 3.0,
            "customer": {"name": "Ada", "email": "not-an-email"},
            "status": "shipped"
        }))
        .unwrap();

        assert_eq!(order.currency, "USD");
        let errors = order.validate().unwrap_err();
        let errors = errors.errors();
        assert!(errors.contains_key("items"));
        assert!(errors.contains_key("customer"));
    }

    #[test]
    fn test_customer_without_fields_deserializes_then_fails_validation() {
        let customer: CustomerInfo = serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(customer.name.is_empty());
        let errors = customer.validate().unwrap_err();
        let errors = errors.field_errors();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
    }

    #[test]
    fn test_product_from_document_reads_all_fields() {
        let doc = stored_product();
        let product = Product::from_document(&doc).unwrap();

        assert_eq!(product.id, doc.get_str("id").unwrap());
        assert_eq!(product.slug, "desk-lamp");
        assert_eq!(product.price, 24.5);
        assert_eq!(product.currency, "EUR");
        assert_eq!(product.tags, vec!["home", "light"]);
        assert!(product.featured);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_product_from_document_fills_defaults() {
        let mut doc = stored_product();
        for key in ["currency", "image", "tags", "featured"] {
            doc.remove(key);
        }
        doc.insert("price", Bson::Null);

        let product = Product::from_document(&doc).unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.currency, "USD");
        assert!(product.image.is_none());
        assert!(product.tags.is_empty());
        assert!(!product.featured);
    }

    #[test]
    fn test_product_from_document_accepts_integer_price() {
        let mut doc = stored_product();
        doc.insert("price", 12_i32);
        assert_eq!(Product::from_document(&doc).unwrap().price, 12.0);

        doc.insert("price", 7_i64);
        assert_eq!(Product::from_document(&doc).unwrap().price, 7.0);
    }

    #[test]
    fn test_product_from_document_requires_name() {
        let mut doc = stored_product();
        doc.remove("name");
        assert!(matches!(
            Product::from_document(&doc),
            Err(StorefrontError::Decode(_))
        ));
    }

    #[test]
    fn test_product_from_document_requires_timestamps() {
        for key in ["created_at", "updated_at"] {
            let mut doc = stored_product();
            doc.remove(key);
            assert!(matches!(
                Product::from_document(&doc),
                Err(StorefrontError::Decode(_))
            ));
        }
    }

    #[test]
    fn test_record_meta_falls_back_to_native_id() {
        let mut doc = stored_product();
        doc.remove("id");
        let oid = doc.get_object_id("_id").unwrap();

        let meta = RecordMeta::from_document(&doc).unwrap();
        assert_eq!(meta.id, oid.to_hex());
    }

    #[test]
    fn test_string_id_forms() {
        let oid = ObjectId::new();
        assert_eq!(string_id(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(string_id(&Bson::String("abc".into())), "abc");
        assert_eq!(string_id(&Bson::Int32(5)), "5");
    }

    #[test]
    fn test_order_from_input_is_pending() {
        let input: CreateOrder = serde_json::from_value(serde_json::json!({
            "items": [{"product_id": "p1", "unit_price": 3.0}],
            "total": 3.0,
            "customer": {"name": "Ada", "email": "ada@example.com"}
        }))
        .unwrap();
        let now = Utc::now();
        let meta = RecordMeta {
            id: "abc".to_string(),
            created_at: now,
            updated_at: now,
        };

        let order = Order::from_input(input, meta);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(serde_json::to_value(order.status).unwrap(), "pending");
    }
}
