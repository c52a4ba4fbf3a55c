#![deny(missing_docs)]

//! # Product Inventory
//!
//! A Lambda request router exposing CRUD operations on a DynamoDB table of products.
//!
//! ## Overview
//!
//! Each invocation carries one proxy-integration request. The [`router::Router`]
//! matches its method and path, runs one storage operation through a
//! [`store::ProductStore`] and answers with a JSON [`response::Response`]:
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | `GET` | `/health` | health check, never touches storage |
//! | `GET` | `/product?productId=...` | get one product |
//! | `GET` | `/products` | scan every product |
//! | `POST` | `/product` | save (overwrite) a product |
//! | `PATCH` | `/product` | set one attribute |
//! | `DELETE` | `/product` | delete a product |
//!
//! ## Quick Example
//!
//! ```rust
//! use product_inventory::{router, store};
//!
//! # async fn example() {
//! let router = router::Router::new(store::InMemoryStore::new(), None);
//! let request = router::Request::new("POST", "/product")
//!     .with_body(r#"{"productId": "1", "name": "Lamp"}"#);
//! let response = router.handle(request).await;
//! assert_eq!(response.status_code, 200);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Key and expression utilities for DynamoDB operations
//! - [`mod@read`] - Read operations (GetItem, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@store`] - The storage client trait and its backends
//! - [`mod@router`] - Request dispatch

/// Common utilities for keys and expressions.
pub mod common;

/// Process configuration.
pub mod config;

/// Handlers bound to each route.
pub mod handlers;

/// Exhaustive pagination over scans.
pub mod pagination;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Scanning a table page by page
pub mod read;

/// The response envelope.
pub mod response;

/// Request dispatch.
pub mod router;

/// Storage client trait and implementations.
pub mod store;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Setting attributes on items
/// - Deleting items by key
pub mod write;
