//! Shopping cart membership and aggregated totals.
//!
//! ```text
//! GET    /api/recipes/shopping_cart/
//! POST   /api/recipes/{id}/shopping_cart/
//! DELETE /api/recipes/{id}/shopping_cart/
//! ```
//!
//! The CSV export lives in [`super::recipes::download_shopping_cart`].
//! `GET /recipes/shopping_cart/` must be registered ahead of
//! `/recipes/{id}/`.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Error, RecipeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{IngredientTotalResponse, RecipeSummaryResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Aggregated ingredient totals of the current user's cart.
#[utoipa::path(
    get,
    path = "/api/recipes/shopping_cart/",
    responses(
        (status = 200, description = "Totals ordered by ingredient name", body = [IngredientTotalResponse]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["shopping cart"],
    operation_id = "shoppingCartTotals"
)]
#[get("/recipes/shopping_cart/")]
pub async fn shopping_cart_totals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let totals = state.shopping_cart_query.totals(&user).await?;
    let body: Vec<IngredientTotalResponse> =
        totals.iter().map(IngredientTotalResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Put a recipe in the current user's cart.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart/",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 201, description = "Added", body = RecipeSummaryResponse),
        (status = 400, description = "Already in the cart", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["shopping cart"],
    operation_id = "addToShoppingCart"
)]
#[post("/recipes/{id}/shopping_cart/")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let summary = state
        .shopping_cart
        .add(&user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(RecipeSummaryResponse::from(&summary)))
}

/// Take a recipe out of the current user's cart.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart/",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Removed"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Not in the cart", body = Error)
    ),
    tags = ["shopping cart"],
    operation_id = "removeFromShoppingCart"
)]
#[delete("/recipes/{id}/shopping_cart/")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    state
        .shopping_cart
        .remove(&user, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
