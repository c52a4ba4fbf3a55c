//! Method and path dispatch for incoming requests.

use crate::common::key::PRODUCT_ID;
use crate::handlers;
use crate::response::Response;
use crate::store::{Product, ProductStore};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections;

/// Path of the health check route.
pub const HEALTH_PATH: &str = "/health";
/// Path of the single product routes.
pub const PRODUCT_PATH: &str = "/product";
/// Path of the product listing route.
pub const PRODUCTS_PATH: &str = "/products";

/// Incoming proxy-integration request.
///
/// Only the fields used for dispatch are read; the rest of the event is ignored.
/// An event without a method or path deserializes with empty ones and is
/// answered as not found.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// HTTP method, e.g. `GET`.
    #[serde(default)]
    pub http_method: String,
    /// Request path, e.g. `/product`.
    #[serde(default)]
    pub path: String,
    /// Query string parameters, absent when the request had none.
    #[serde(default)]
    pub query_string_parameters: Option<collections::HashMap<String, String>>,
    /// Raw JSON body.
    #[serde(default)]
    pub body: Option<String>,
}

impl Request {
    /// Build a request without query parameters or body.
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Attach a query string parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(collections::HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach a raw body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn query(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }

    fn parse_body<T: DeserializeOwned>(&self) -> Option<T> {
        let body = self.body.as_deref()?;
        match serde_json::from_str(body) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path, "Invalid request body");
                None
            }
        }
    }
}

/// Body of a PATCH /product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModifyRequest {
    product_id: String,
    update_key: String,
    /// Required; an explicit `null` is stored as NULL.
    update_value: Value,
}

/// Body of a DELETE /product request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest {
    product_id: String,
}

/// The recognized routes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Route {
    /// `GET /health`
    Health,
    /// `GET /product?productId=...`
    GetProduct,
    /// `GET /products`
    GetProducts,
    /// `POST /product`
    SaveProduct,
    /// `PATCH /product`
    ModifyProduct,
    /// `DELETE /product`
    DeleteProduct,
    /// Anything else.
    NotFound,
}

impl Route {
    /// Match a method and path exactly; no prefix or case folding.
    pub fn resolve(http_method: &str, path: &str) -> Self {
        match (http_method, path) {
            ("GET", HEALTH_PATH) => Self::Health,
            ("GET", PRODUCT_PATH) => Self::GetProduct,
            ("GET", PRODUCTS_PATH) => Self::GetProducts,
            ("POST", PRODUCT_PATH) => Self::SaveProduct,
            ("PATCH", PRODUCT_PATH) => Self::ModifyProduct,
            ("DELETE", PRODUCT_PATH) => Self::DeleteProduct,
            _ => Self::NotFound,
        }
    }
}

/// Dispatches requests to the product handlers over an injected store.
#[derive(Clone, Debug)]
pub struct Router<S> {
    store: S,
    page_size: Option<i32>,
}

impl<S: ProductStore> Router<S> {
    /// Creates a router over `store`; `page_size` bounds each scan page.
    pub fn new(store: S, page_size: Option<i32>) -> Self {
        Self { store, page_size }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one request.
    pub async fn handle(&self, request: Request) -> Response {
        tracing::info!(
            http_method = %request.http_method,
            path = %request.path,
            "Request event"
        );
        match Route::resolve(&request.http_method, &request.path) {
            Route::Health => handlers::health_check(),
            Route::GetProduct => match request.query(PRODUCT_ID) {
                Some(product_id) => handlers::get_product(&self.store, product_id).await,
                None => {
                    tracing::warn!("Missing productId query parameter");
                    handlers::bad_request()
                }
            },
            Route::GetProducts => handlers::get_products(&self.store, self.page_size).await,
            Route::SaveProduct => match request.parse_body::<Product>() {
                Some(product) => handlers::save_product(&self.store, product).await,
                None => handlers::bad_request(),
            },
            Route::ModifyProduct => match request.parse_body::<ModifyRequest>() {
                Some(modify) => {
                    handlers::modify_product(
                        &self.store,
                        &modify.product_id,
                        &modify.update_key,
                        modify.update_value,
                    )
                    .await
                }
                None => handlers::bad_request(),
            },
            Route::DeleteProduct => match request.parse_body::<DeleteRequest>() {
                Some(delete) => handlers::delete_product(&self.store, &delete.product_id).await,
                None => handlers::bad_request(),
            },
            Route::NotFound => handlers::not_found(),
        }
    }
}
