//! User record service.
//!
//! Hexagonal layout: [`domain`] owns the model and ports, [`outbound`]
//! holds the PostgreSQL and in-memory stores, [`inbound`] exposes them over
//! HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
