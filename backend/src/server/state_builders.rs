//! Builders for the shared HTTP state.

use std::sync::Arc;

use actix_web::web;

use cookbook::domain::ports::{
    FixtureCatalogueRepository, FixtureFavoriteRepository, FixtureLoginService,
    FixtureRecipeRepository, FixtureShoppingListRepository, FixtureShortLinkRepository,
    FixtureSubscriptionRepository, FixtureUserRepository,
};
use cookbook::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
use cookbook::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselFavoriteRepository, DieselLoginService,
    DieselRecipeRepository, DieselShoppingListRepository, DieselShortLinkRepository,
    DieselSubscriptionRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Diesel adapters sharing one pool.
fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts::from_repositories(Repositories {
        login: Arc::new(DieselLoginService::new(DieselUserRepository::new(
            pool.clone(),
        ))),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
        favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
        shopping_lists: Arc::new(DieselShoppingListRepository::new(pool.clone())),
        subscriptions: Arc::new(DieselSubscriptionRepository::new(pool.clone())),
        short_links: Arc::new(DieselShortLinkRepository::new(pool.clone())),
    })
}

/// Empty in-process repositories with the development login.
fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts::from_repositories(Repositories {
        login: Arc::new(FixtureLoginService),
        users: Arc::new(FixtureUserRepository),
        catalogue: Arc::new(FixtureCatalogueRepository),
        recipes: Arc::new(FixtureRecipeRepository),
        favorites: Arc::new(FixtureFavoriteRepository),
        shopping_lists: Arc::new(FixtureShoppingListRepository),
        subscriptions: Arc::new(FixtureSubscriptionRepository),
        short_links: Arc::new(FixtureShortLinkRepository),
    })
}

/// Build the shared HTTP state, preferring database-backed adapters when a
/// pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => fixture_ports(),
    };
    web::Data::new(HttpState::new(ports, config.base_url.clone()))
}
