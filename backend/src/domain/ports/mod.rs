//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (`*Repository`) are implemented by
//! outbound adapters and carry typed errors that convert into
//! [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod avatar_command;
mod catalogue_repository;
mod favorite_repository;
mod favorites_command;
mod login_service;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod shopping_cart_command;
mod shopping_cart_query;
mod shopping_list_repository;
mod short_link_command;
mod short_link_query;
mod short_link_repository;
mod subscription_repository;
mod subscriptions_command;
mod subscriptions_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use avatar_command::MockAvatarCommand;
pub use avatar_command::AvatarCommand;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{
    CatalogueRepository, CatalogueRepositoryError, FixtureCatalogueRepository, IngredientUpsert,
};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{
    FavoriteRepository, FavoriteRepositoryError, FixtureFavoriteRepository,
};
#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
pub use favorites_command::FavoritesCommand;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{
    AuthorRecipes, FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError,
};
#[cfg(test)]
pub use shopping_cart_command::MockShoppingCartCommand;
pub use shopping_cart_command::ShoppingCartCommand;
#[cfg(test)]
pub use shopping_cart_query::MockShoppingCartQuery;
pub use shopping_cart_query::ShoppingCartQuery;
#[cfg(test)]
pub use shopping_list_repository::MockShoppingListRepository;
pub use shopping_list_repository::{
    FixtureShoppingListRepository, ShoppingListRepository, ShoppingListRepositoryError,
};
#[cfg(test)]
pub use short_link_command::MockShortLinkCommand;
pub use short_link_command::ShortLinkCommand;
#[cfg(test)]
pub use short_link_query::MockShortLinkQuery;
pub use short_link_query::ShortLinkQuery;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
pub use short_link_repository::{
    FixtureShortLinkRepository, ShortLinkRepository, ShortLinkRepositoryError, ShortLinkSubject,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use subscriptions_command::MockSubscriptionsCommand;
pub use subscriptions_command::SubscriptionsCommand;
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::SubscriptionsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
