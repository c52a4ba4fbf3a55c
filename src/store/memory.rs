use crate::common::key::PRODUCT_ID;
use crate::store::{Cursor, Page, Product, ProductStore, Result, StoreError};

use async_trait::async_trait;
use serde_json::Value;
use std::collections;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Page size used when a scan does not ask for a limit.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory storage backend.
///
/// Products are kept in key order, so scans are stable and the cursor is the
/// `productId` of the last item returned. Data is lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    products: Arc<RwLock<collections::BTreeMap<String, Product>>>,
    page_size: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates a new empty store whose scans return at most `page_size` items.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            products: Arc::new(RwLock::new(collections::BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Whether the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn product_id_of(product: &Product) -> Result<String> {
    match product.get(PRODUCT_ID) {
        Some(Value::String(product_id)) => Ok(product_id.clone()),
        _ => Err(StoreError::MissingKey(PRODUCT_ID)),
    }
}

fn cursor_of(cursor: &Cursor) -> Result<String> {
    match cursor.get(PRODUCT_ID) {
        Some(Value::String(product_id)) => Ok(product_id.clone()),
        _ => Err(StoreError::Request {
            operation: "Scan",
            message: "The provided starting key is invalid".to_string(),
        }),
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(product_id).cloned())
    }

    async fn scan_products(
        &self,
        exclusive_start_key: Option<Cursor>,
        limit: Option<i32>,
    ) -> Result<Page> {
        let start = match exclusive_start_key {
            Some(cursor) => Bound::Excluded(cursor_of(&cursor)?),
            None => Bound::Unbounded,
        };
        let page_size = match limit {
            Some(limit) if limit > 0 => (limit as usize).min(self.page_size),
            Some(_) => {
                return Err(StoreError::Request {
                    operation: "Scan",
                    message: "Limit must be greater than or equal to 1".to_string(),
                });
            }
            None => self.page_size,
        };
        let products = self.products.read().await;
        let mut remaining = products.range((start, Bound::Unbounded));
        let items: Vec<Product> = remaining
            .by_ref()
            .take(page_size)
            .map(|(_, product)| product.clone())
            .collect();
        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => {
                let product_id = product_id_of(last)?;
                Some(Cursor::from([(
                    PRODUCT_ID.to_string(),
                    Value::String(product_id),
                )]))
            }
            _ => None,
        };
        Ok(Page {
            items,
            last_evaluated_key,
        })
    }

    async fn put_product(&self, product: Product) -> Result<()> {
        let product_id = product_id_of(&product)?;
        let mut products = self.products.write().await;
        products.insert(product_id, product);
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<Product> {
        if attribute == PRODUCT_ID {
            return Err(StoreError::Request {
                operation: "UpdateItem",
                message: format!("Cannot update attribute {PRODUCT_ID}. This attribute is part of the key"),
            });
        }
        let mut products = self.products.write().await;
        let product = products.entry(product_id.to_string()).or_insert_with(|| {
            Product::from_iter([(
                PRODUCT_ID.to_string(),
                Value::String(product_id.to_string()),
            )])
        });
        product.insert(attribute.to_string(), value.clone());
        Ok(Product::from_iter([(attribute.to_string(), value)]))
    }

    async fn delete_product(&self, product_id: &str) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.remove(product_id))
    }
}
