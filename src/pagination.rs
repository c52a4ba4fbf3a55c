//! Exhaustive pagination over a product table scan.

use crate::store::{Product, ProductStore, Result};

/// Scan the whole table, following the cursor until no page remains.
///
/// Pages are requested one at a time since each request depends on the
/// previous cursor. `page_size` of `None` leaves the page size to the store.
pub async fn try_scan_all<S: ProductStore + ?Sized>(
    store: &S,
    page_size: Option<i32>,
) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    let mut exclusive_start_key = None;
    loop {
        let page = store.scan_products(exclusive_start_key, page_size).await?;
        tracing::debug!(
            items = page.items.len(),
            has_more = page.last_evaluated_key.is_some(),
            "Scanned page"
        );
        products.extend(page.items);
        match page.last_evaluated_key {
            Some(last_evaluated_key) => exclusive_start_key = Some(last_evaluated_key),
            None => return Ok(products),
        }
    }
}

/// Scan the whole table, degrading to an empty result on failure.
///
/// A failure on any page discards the pages already collected; the error is
/// only logged.
pub async fn scan_all<S: ProductStore + ?Sized>(store: &S, page_size: Option<i32>) -> Vec<Product> {
    match try_scan_all(store, page_size).await {
        Ok(products) => products,
        Err(err) => {
            tracing::error!(error = %err, "Error scanning records");
            Vec::new()
        }
    }
}
