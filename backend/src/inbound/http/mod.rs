//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and map the resulting domain values into the DTOs in [`schemas`].

pub mod auth;
pub mod cache_control;
pub mod catalogue;
pub mod error;
pub mod favorites;
pub mod health;
pub mod recipes;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod shopping_cart;
pub mod short_links;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
