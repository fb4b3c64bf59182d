//! Extractor configuration.
//!
//! Actix answers malformed bodies, paths and query strings with plain-text
//! errors by default. These configs reroute those failures through the
//! domain [`Error`] so every 400 has the JSON error shape.

use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

fn rejected(kind: &'static str, message: &'static str, reason: String) -> actix_web::Error {
    debug!(kind, %reason, "request extraction failed");
    Error::invalid_request(message)
        .with_details(json!({ "reason": reason }))
        .into()
}

/// JSON bodies: malformed input, wrong types and unknown fields become 400.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        rejected("body", "Invalid request body", err.to_string())
    })
}

/// Path segments: a non-integer user id becomes 400.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        rejected("path", "Invalid path parameter", err.to_string())
    })
}

/// Query strings.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        rejected("query", "Invalid query string", err.to_string())
    })
}
