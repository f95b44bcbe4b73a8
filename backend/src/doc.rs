//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every handler under `/api`, the short-link redirect
//! and the health probes. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::recipes::{IngredientAmountRequest, RecipeRequest, ShortLinkResponse};
use crate::inbound::http::schemas::{
    AvatarRequest, AvatarResponse, IngredientResponse, IngredientTotalResponse,
    RecipeIngredientResponse, RecipeListResponse, RecipeResponse, RecipeSummaryResponse,
    SubscribedAuthorResponse, SubscriptionListResponse, TagResponse, UserResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cookbook API",
        description = "Recipes, favorites, subscriptions and shopping lists."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::set_avatar,
        crate::inbound::http::users::delete_avatar,
        crate::inbound::http::users::list_subscriptions,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::subscribe,
        crate::inbound::http::users::unsubscribe,
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::catalogue::get_tag,
        crate::inbound::http::catalogue::list_ingredients,
        crate::inbound::http::catalogue::get_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::download_shopping_cart,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::replace_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::get_link,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::shopping_cart::shopping_cart_totals,
        crate::inbound::http::shopping_cart::add_to_cart,
        crate::inbound::http::shopping_cart::remove_from_cart,
        crate::inbound::http::short_links::resolve_short_link,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        UserResponse,
        AvatarRequest,
        AvatarResponse,
        SubscribedAuthorResponse,
        SubscriptionListResponse,
        TagResponse,
        IngredientResponse,
        RecipeRequest,
        IngredientAmountRequest,
        RecipeIngredientResponse,
        RecipeResponse,
        RecipeSummaryResponse,
        RecipeListResponse,
        IngredientTotalResponse,
        ShortLinkResponse,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "users", description = "Profiles and subscriptions"),
        (name = "catalogue", description = "Tags and ingredients"),
        (name = "recipes", description = "Recipe publishing and browsing"),
        (name = "favorites", description = "Favorite recipes"),
        (name = "shopping cart", description = "Shopping list and export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
