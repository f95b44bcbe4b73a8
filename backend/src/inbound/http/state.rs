//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AvatarCommand, CatalogueRepository, FavoriteRepository, FavoritesCommand, LoginService, RecipeCommand,
    RecipeQuery, RecipeRepository, ShoppingCartCommand, ShoppingCartQuery, ShoppingListRepository,
    ShortLinkCommand, ShortLinkQuery, ShortLinkRepository, SubscriptionRepository,
    SubscriptionsCommand, SubscriptionsQuery, UserRepository, UsersQuery,
};
use crate::domain::{
    AvatarService, FavoritesService, RecipeId, RecipeService, RecipeViewContext, ShoppingCartService,
    ShortLinkService, ShortLinkToken, SubscriptionService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub avatars: Arc<dyn AvatarCommand>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub shopping_cart: Arc<dyn ShoppingCartCommand>,
    pub shopping_cart_query: Arc<dyn ShoppingCartQuery>,
    pub short_links: Arc<dyn ShortLinkCommand>,
    pub short_links_query: Arc<dyn ShortLinkQuery>,
}

/// Driven adapters the domain services are assembled from.
pub struct Repositories<U, C, R, F, S, B, L> {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<U>,
    pub catalogue: Arc<C>,
    pub recipes: Arc<R>,
    pub favorites: Arc<F>,
    pub shopping_lists: Arc<S>,
    pub subscriptions: Arc<B>,
    pub short_links: Arc<L>,
}

impl HttpStatePorts {
    /// Wire the domain services on top of `repos`.
    pub fn from_repositories<U, C, R, F, S, B, L>(repos: Repositories<U, C, R, F, S, B, L>) -> Self
    where
        U: UserRepository + 'static,
        C: CatalogueRepository + 'static,
        R: RecipeRepository + 'static,
        F: FavoriteRepository + 'static,
        S: ShoppingListRepository + 'static,
        B: SubscriptionRepository + 'static,
        L: ShortLinkRepository + 'static,
    {
        let Repositories {
            login,
            users,
            catalogue,
            recipes,
            favorites,
            shopping_lists,
            subscriptions,
            short_links,
        } = repos;

        let views = RecipeViewContext::new(
            users.clone(),
            favorites.clone(),
            shopping_lists.clone(),
            subscriptions.clone(),
        );
        let recipe_service = Arc::new(RecipeService::new(
            recipes.clone(),
            catalogue.clone(),
            views,
        ));
        let avatar_service = Arc::new(AvatarService::new(users.clone()));
        let subscription_service = Arc::new(SubscriptionService::new(
            subscriptions,
            users,
            recipes.clone(),
        ));
        let cart_service = Arc::new(ShoppingCartService::new(shopping_lists, recipes.clone()));
        let link_service = Arc::new(ShortLinkService::new(short_links));

        Self {
            login,
            users: subscription_service.clone(),
            avatars: avatar_service,
            subscriptions: subscription_service.clone(),
            subscriptions_query: subscription_service,
            catalogue,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            favorites: Arc::new(FavoritesService::new(favorites, recipes)),
            shopping_cart: cart_service.clone(),
            shopping_cart_query: cart_service,
            short_links: link_service.clone(),
            short_links_query: link_service,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub avatars: Arc<dyn AvatarCommand>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub shopping_cart: Arc<dyn ShoppingCartCommand>,
    pub shopping_cart_query: Arc<dyn ShoppingCartQuery>,
    pub short_links: Arc<dyn ShortLinkCommand>,
    pub short_links_query: Arc<dyn ShortLinkQuery>,
    base_url: String,
}

impl HttpState {
    /// Construct state from a ports bundle and the public base URL used for
    /// short links and redirects.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use cookbook::domain::ports::{
    ///     FixtureCatalogueRepository, FixtureFavoriteRepository, FixtureLoginService,
    ///     FixtureRecipeRepository, FixtureShoppingListRepository, FixtureShortLinkRepository,
    ///     FixtureSubscriptionRepository, FixtureUserRepository,
    /// };
    /// use cookbook::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
    ///
    /// let ports = HttpStatePorts::from_repositories(Repositories {
    ///     login: Arc::new(FixtureLoginService),
    ///     users: Arc::new(FixtureUserRepository),
    ///     catalogue: Arc::new(FixtureCatalogueRepository),
    ///     recipes: Arc::new(FixtureRecipeRepository),
    ///     favorites: Arc::new(FixtureFavoriteRepository),
    ///     shopping_lists: Arc::new(FixtureShoppingListRepository),
    ///     subscriptions: Arc::new(FixtureSubscriptionRepository),
    ///     short_links: Arc::new(FixtureShortLinkRepository),
    /// });
    /// let state = HttpState::new(ports, "https://cookbook.example/");
    /// assert_eq!(state.base_url(), "https://cookbook.example");
    /// ```
    pub fn new(ports: HttpStatePorts, base_url: impl Into<String>) -> Self {
        let HttpStatePorts {
            login,
            users,
            avatars,
            subscriptions,
            subscriptions_query,
            catalogue,
            recipes,
            recipes_query,
            favorites,
            shopping_cart,
            shopping_cart_query,
            short_links,
            short_links_query,
        } = ports;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            login,
            users,
            avatars,
            subscriptions,
            subscriptions_query,
            catalogue,
            recipes,
            recipes_query,
            favorites,
            shopping_cart,
            shopping_cart_query,
            short_links,
            short_links_query,
            base_url,
        }
    }

    /// Public origin without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute short-link URL served by the redirect endpoint.
    pub fn short_link_url(&self, token: &ShortLinkToken) -> String {
        format!("{}/s/{token}/", self.base_url)
    }

    /// Absolute URL of the recipe page a short link points at.
    pub fn recipe_url(&self, id: RecipeId) -> String {
        format!("{}/recipes/{}/", self.base_url, id.get())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::fixture_ports;

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/s/abc123/")]
    #[case("http://localhost:8080/", "http://localhost:8080/s/abc123/")]
    fn short_link_urls_join_cleanly(#[case] base: &str, #[case] expected: &str) {
        let state = HttpState::new(fixture_ports(), base);
        let token = ShortLinkToken::parse("abc123").expect("valid token");
        assert_eq!(state.short_link_url(&token), expected);
    }

    #[rstest]
    fn recipe_urls_use_the_front_end_path() {
        let state = HttpState::new(fixture_ports(), "https://cook.example");
        assert_eq!(
            state.recipe_url(RecipeId::new(42)),
            "https://cook.example/recipes/42/"
        );
    }
}
