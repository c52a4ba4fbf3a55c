//! Handlers bound to the product routes.
//!
//! Every storage failure is logged here and answered with a generic 500 body;
//! the cause never reaches the caller.

use crate::pagination;
use crate::response::Response;
use crate::store::{Product, ProductStore};

use serde::Serialize;
use serde_json::{Value, json};

/// Body of the health check response.
pub const HEALTH_CHECK_OK: &str = "Health check OK";

/// Body of the not-found response.
pub const NOT_FOUND: &str = "Not Found";

const SUCCESS: &str = "SUCCESS";

/// Outcome of a write operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WriteOutcome<'a> {
    operation: &'static str,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<&'a Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_attributes: Option<&'a Value>,
}

impl WriteOutcome<'_> {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            message: SUCCESS,
            item: None,
            updated_attributes: None,
        }
    }
}

fn server_error(message: &str) -> Response {
    Response::json(500, &json!({ "error": message }))
}

/// Answer the health check without touching storage.
pub fn health_check() -> Response {
    Response::json(200, HEALTH_CHECK_OK)
}

/// Answer a request no route matched.
pub fn not_found() -> Response {
    Response::json(404, NOT_FOUND)
}

/// Answer a request whose parameters or body could not be read.
pub fn bad_request() -> Response {
    Response::json(400, &json!({ "error": "Invalid request" }))
}

/// Fetch one product; an unknown id yields 200 with a `null` body.
pub async fn get_product<S: ProductStore + ?Sized>(store: &S, product_id: &str) -> Response {
    match store.get_product(product_id).await {
        Ok(product) => Response::json(200, &product),
        Err(err) => {
            tracing::error!(error = %err, product_id, "Error fetching product");
            server_error("Error fetching product")
        }
    }
}

/// Fetch every product; scan failures degrade to an empty list.
pub async fn get_products<S: ProductStore + ?Sized>(store: &S, page_size: Option<i32>) -> Response {
    let products = pagination::scan_all(store, page_size).await;
    Response::json(200, &json!({ "products": products }))
}

/// Store a product, replacing any existing one with the same id.
pub async fn save_product<S: ProductStore + ?Sized>(store: &S, product: Product) -> Response {
    match store.put_product(product.clone()).await {
        Ok(()) => Response::json(
            200,
            &WriteOutcome {
                item: Some(&product),
                ..WriteOutcome::new("SAVE")
            },
        ),
        Err(err) => {
            tracing::error!(error = %err, "Error saving product");
            server_error("Error saving product")
        }
    }
}

/// Set one attribute of a product and return its new value.
pub async fn modify_product<S: ProductStore + ?Sized>(
    store: &S,
    product_id: &str,
    update_key: &str,
    update_value: Value,
) -> Response {
    match store
        .update_product(product_id, update_key, update_value)
        .await
    {
        Ok(attributes) => Response::json(
            200,
            &WriteOutcome {
                updated_attributes: attributes.get(update_key),
                ..WriteOutcome::new("UPDATE")
            },
        ),
        Err(err) => {
            tracing::error!(error = %err, product_id, update_key, "Error modifying product");
            server_error("Error modifying product")
        }
    }
}

/// Delete a product; deleting an unknown id still succeeds.
pub async fn delete_product<S: ProductStore + ?Sized>(store: &S, product_id: &str) -> Response {
    match store.delete_product(product_id).await {
        Ok(prior) => Response::json(
            200,
            &WriteOutcome {
                item: prior.as_ref(),
                ..WriteOutcome::new("DELETE")
            },
        ),
        Err(err) => {
            tracing::error!(error = %err, product_id, "Error deleting product");
            server_error("Error deleting product")
        }
    }
}
