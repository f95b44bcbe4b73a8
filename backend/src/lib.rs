//! Cookbook backend: recipe sharing with favorites, subscriptions and a
//! shopping list, served over a session-authenticated REST API.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
