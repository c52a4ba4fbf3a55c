//! Read operations for retrieving data from DynamoDB tables.
//!
//! This module provides operations for reading data from DynamoDB:
//! - Getting individual items by key
//! - Scanning a table one page at a time

/// Common utilities and types for read operations.
pub mod common;

/// Get item operation for retrieving a single item by key.
pub mod get_item;

/// Scan operation for retrieving one page of items from a table.
pub mod scan;
