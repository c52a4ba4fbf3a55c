//! Storage client abstraction for the product table.
//!
//! Handlers only talk to a [`ProductStore`]; the DynamoDB-backed store is
//! built once per process and injected, and tests substitute the in-memory one.

/// DynamoDB-backed store.
pub mod dynamodb;

/// In-memory store for tests and local runs.
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::collections;
use thiserror::Error;

pub use dynamodb::DynamoDbStore;
pub use memory::InMemoryStore;

/// A product record: an open-ended JSON object keyed by `productId`.
pub type Product = serde_json::Map<String, Value>;

/// Continuation token of a scan (the last evaluated key).
pub type Cursor = collections::HashMap<String, Value>;

/// One page of a scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Items of this page, in storage order.
    pub items: Vec<Product>,
    /// Where the next page starts, `None` on the last page.
    pub last_evaluated_key: Option<Cursor>,
}

/// Errors raised by a [`ProductStore`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The storage service rejected or failed the request.
    #[error("{operation} failed: {message}")]
    Request {
        /// Name of the storage operation.
        operation: &'static str,
        /// Description of the cause.
        message: String,
    },
    /// An item could not be converted between JSON and storage attributes.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The item carries no string `productId`.
    #[error("Item is missing the {0} key")]
    MissingKey(&'static str),
}

impl From<serde_dynamo::Error> for StoreError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The five storage primitives behind the product routes.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch one product by key.
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>>;

    /// Fetch one page of the table, starting after `exclusive_start_key`.
    async fn scan_products(
        &self,
        exclusive_start_key: Option<Cursor>,
        limit: Option<i32>,
    ) -> Result<Page>;

    /// Store a product, replacing any existing one with the same key.
    async fn put_product(&self, product: Product) -> Result<()>;

    /// Set one attribute, creating the product when absent.
    ///
    /// Returns the updated attributes with their new values.
    async fn update_product(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<Product>;

    /// Delete a product, returning the prior record if there was one.
    async fn delete_product(&self, product_id: &str) -> Result<Option<Product>>;
}
