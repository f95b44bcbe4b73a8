//! Route table for the `/api` scope.
//!
//! Literal segments under `/recipes/` and `/users/` are registered ahead of
//! their `{id}` siblings because actix matches services in registration
//! order and `{id}` accepts any segment.

use actix_web::web;

use crate::inbound::http::auth::{login, logout};
use crate::inbound::http::catalogue::{get_ingredient, get_tag, list_ingredients, list_tags};
use crate::inbound::http::favorites::{add_favorite, remove_favorite};
use crate::inbound::http::recipes::{
    create_recipe, delete_recipe, download_shopping_cart, get_link, get_recipe, list_recipes,
    replace_recipe, update_recipe,
};
use crate::inbound::http::shopping_cart::{add_to_cart, remove_from_cart, shopping_cart_totals};
use crate::inbound::http::users::{
    current_user, delete_avatar, get_user, list_subscriptions, set_avatar, subscribe, unsubscribe,
};
use crate::inbound::http::validation::{json_config, query_config};

/// Register every handler served under `/api`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use cookbook::inbound::http::routes;
///
/// let app = App::new().service(web::scope("/api").configure(routes::api));
/// ```
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(login)
        .service(logout)
        .service(current_user)
        .service(set_avatar)
        .service(delete_avatar)
        .service(list_subscriptions)
        .service(get_user)
        .service(subscribe)
        .service(unsubscribe)
        .service(list_tags)
        .service(get_tag)
        .service(list_ingredients)
        .service(get_ingredient)
        .service(list_recipes)
        .service(create_recipe)
        .service(download_shopping_cart)
        .service(shopping_cart_totals)
        .service(get_recipe)
        .service(update_recipe)
        .service(replace_recipe)
        .service(delete_recipe)
        .service(get_link)
        .service(add_favorite)
        .service(remove_favorite)
        .service(add_to_cart)
        .service(remove_from_cart);
}
