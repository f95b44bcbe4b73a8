//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. Ownership checks and error wording live
//!   in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic writes**: recipe writes and registry toggles are single
//!   statements or single transactions.
//! - **Strongly typed errors**: every Diesel and pool failure becomes the
//!   port's `Connection` or `Query` variant.
//!
//! # Example
//!
//! ```ignore
//! use cookbook::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cookbook")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_catalogue_repository;
mod diesel_favorite_repository;
mod diesel_login_service;
mod diesel_recipe_repository;
mod diesel_shopping_list_repository;
mod diesel_short_link_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_shopping_list_repository::DieselShoppingListRepository;
pub use diesel_short_link_repository::DieselShortLinkRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
