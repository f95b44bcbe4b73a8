//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities and the use-case services
//! that the HTTP adapter drives. Types keep their invariants behind
//! constructors; services depend only on the traits in [`ports`].
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - Catalogue: [`Tag`], [`Ingredient`] and their validated drafts.
//! - Recipes: [`RecipeDraft`] for writes, [`Recipe`] and [`RecipeView`] for reads.
//! - Shopping lists: [`aggregate_ingredients`] and [`render_csv`].
//! - Short links: [`ShortLinkToken`].
//! - Services: [`RecipeService`], [`FavoritesService`], [`AvatarService`],
//!   [`ShoppingCartService`], [`SubscriptionService`], [`ShortLinkService`].

pub mod auth;
pub mod catalogue;
pub mod error;
pub mod image;
pub mod membership;
pub mod pagination;
pub mod ports;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod slug;
pub mod subscription;
pub mod trace_id;
pub mod user;

mod avatar_service;
mod favorites_service;
mod recipe_service;
mod recipe_views;
mod shopping_cart_service;
mod short_link_service;
mod subscription_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::avatar_service::AvatarService;
pub use self::catalogue::{
    CatalogueValidationError, Ingredient, IngredientDraft, IngredientId, Tag, TagDraft, TagId,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorites_service::FavoritesService;
pub use self::image::{ImageData, InvalidImageData};
pub use self::membership::{MembershipAdd, MembershipRemoval};
pub use self::pagination::{
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, PageRequest, PageRequestError,
};
pub use self::recipe::{
    Amount, IngredientAmount, IngredientAmountInput, QUANTITY_MAX, RECIPE_NAME_MAX, Recipe,
    RecipeDraft, RecipeFilter, RecipeId, RecipeIngredient, RecipeInput,
    RecipeListOptions, RecipeSummary, RecipeValidationError, RecipeView,
};
pub use self::recipe_service::RecipeService;
pub use self::recipe_views::RecipeViewContext;
pub use self::shopping_cart_service::ShoppingCartService;
pub use self::shopping_list::{
    AggregationError, CSV_FILE_NAME, CSV_HEADER, CartLine, IngredientTotal,
    aggregate_ingredients, render_csv,
};
pub use self::short_link::{
    MAX_SHORT_LINK_ATTEMPTS, ShortLinkClaim, ShortLinkToken, ShortLinkTokenError, TOKEN_LEN,
};
pub use self::short_link_service::ShortLinkService;
pub use self::subscription::{SubscribedAuthor, UserProfile};
pub use self::subscription_service::SubscriptionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, User, UserId, UserParts, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use cookbook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
