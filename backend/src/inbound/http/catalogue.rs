//! Tag and ingredient read endpoints.
//!
//! ```text
//! GET /api/tags/
//! GET /api/tags/{id}/
//! GET /api/ingredients/?name=fl
//! GET /api/ingredients/{id}/
//! ```
//!
//! The catalogue is small and public, so these lists are not paginated.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{Error, IngredientId, TagId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{IngredientResponse, TagResponse};
use crate::inbound::http::state::HttpState;

/// List every tag ordered by name.
#[utoipa::path(
    get,
    path = "/api/tags/",
    responses(
        (status = 200, description = "Tags", body = [TagResponse]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags/")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagResponse>>> {
    let tags = state.catalogue.list_tags().await?;
    Ok(web::Json(tags.iter().map(TagResponse::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/tags/{id}/",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag", body = TagResponse),
        (status = 404, description = "Unknown tag", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}/")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TagResponse>> {
    let tag = state
        .catalogue
        .find_tag(TagId::new(path.into_inner()))
        .await?
        .ok_or_else(|| Error::not_found("Tag not found."))?;
    Ok(web::Json(TagResponse::from(&tag)))
}

/// Query parameters for the ingredient search.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchQuery {
    /// Case-insensitive name prefix; blank means no filter.
    pub name: Option<String>,
}

/// Search ingredients by case-insensitive name prefix.
#[utoipa::path(
    get,
    path = "/api/ingredients/",
    params(("name" = Option<String>, Query, description = "Name prefix")),
    responses(
        (status = 200, description = "Ingredients", body = [IngredientResponse]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients/")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    query: web::Query<IngredientSearchQuery>,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let prefix = query
        .into_inner()
        .name
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty());
    let ingredients = state.catalogue.list_ingredients(prefix).await?;
    Ok(web::Json(
        ingredients.iter().map(IngredientResponse::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/ingredients/{id}/",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 404, description = "Unknown ingredient", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}/")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let ingredient = state
        .catalogue
        .find_ingredient(IngredientId::new(path.into_inner()))
        .await?
        .ok_or_else(|| Error::not_found("Ingredient not found."))?;
    Ok(web::Json(IngredientResponse::from(&ingredient)))
}
