//! Response envelope returned for every request.

use serde::{Deserialize, Serialize};
use std::collections;

/// Content type declared on every response.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Proxy-integration response: status code, headers and a JSON string body.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, always `Content-Type: application/json`.
    pub headers: collections::HashMap<String, String>,
    /// The JSON-serialized body.
    pub body: String,
}

impl Response {
    /// Build a response whose body is `body` serialized as JSON.
    ///
    /// ```rust
    /// use product_inventory::response::Response;
    ///
    /// let response = Response::json(404, &"Not Found");
    /// assert_eq!(response.body, "\"Not Found\"");
    /// ```
    pub fn json<B: Serialize + ?Sized>(status_code: u16, body: &B) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|err| {
            tracing::error!(error = %err, "Error serializing response body");
            "null".to_string()
        });
        Self {
            status_code,
            headers: collections::HashMap::from([(
                "Content-Type".to_string(),
                CONTENT_TYPE_JSON.to_string(),
            )]),
            body,
        }
    }

    /// Parse the body back into a JSON value.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
