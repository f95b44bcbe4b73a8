//! Recipe CRUD, short-link and shopping-list export handlers.
//!
//! ```text
//! GET    /api/recipes/?page=1&limit=6&author=<uuid>&tags=lunch&tags=soup&is_favorited=1
//! POST   /api/recipes/
//! GET    /api/recipes/download_shopping_cart/
//! GET    /api/recipes/{id}/
//! PATCH  /api/recipes/{id}/
//! PUT    /api/recipes/{id}/
//! DELETE /api/recipes/{id}/
//! GET    /api/recipes/{id}/get-link/
//! ```
//!
//! `download_shopping_cart` must be registered ahead of `/recipes/{id}/`.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CSV_FILE_NAME, Error, IngredientAmountInput, Page, RecipeFilter, RecipeId, RecipeInput,
    RecipeListOptions, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{RecipeListResponse, RecipeResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, LIMIT, PAGE, page_request, parse_flag, parse_positive_u32, parse_user_id,
    query_pairs,
};

const AUTHOR: FieldName = FieldName::new("author");
const IS_FAVORITED: FieldName = FieldName::new("is_favorited");
const IS_IN_SHOPPING_CART: FieldName = FieldName::new("is_in_shopping_cart");

/// One `{id, amount}` entry of a recipe payload.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
pub struct IngredientAmountRequest {
    #[serde(default)]
    #[schema(example = 7)]
    pub id: i64,
    #[serde(default)]
    #[schema(example = 200)]
    pub amount: i64,
}

/// Create and update payload.
///
/// Missing fields deserialize to empty values so the domain reports them
/// with field-level details.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RecipeRequest {
    #[serde(default)]
    #[schema(example = "Tomato soup")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Simmer everything for half an hour.")]
    pub text: String,
    #[serde(default)]
    #[schema(example = 30)]
    pub cooking_time: i64,
    #[serde(default)]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAmountRequest>,
}

impl From<RecipeRequest> for RecipeInput {
    fn from(value: RecipeRequest) -> Self {
        Self {
            name: value.name,
            text: value.text,
            cooking_time: value.cooking_time,
            image: value.image,
            tags: value.tags,
            ingredients: value
                .ingredients
                .into_iter()
                .map(|line| IngredientAmountInput {
                    id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

/// Body of `GET /api/recipes/{id}/get-link/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    #[schema(example = "http://localhost:8080/s/3f2a9c/")]
    pub short_link: String,
}

/// Parsed list query: filter options plus paging.
///
/// Read from raw pairs rather than `web::Query` because `tags` repeats.
#[derive(Debug, Default)]
struct ListQuery {
    options: RecipeListOptions,
    page: Option<u32>,
    limit: Option<u32>,
}

impl ListQuery {
    fn parse(query: &str) -> Result<Self, Error> {
        let mut parsed = Self::default();
        for (key, value) in query_pairs(query) {
            match key.as_str() {
                "page" => parsed.page = Some(parse_positive_u32(&value, PAGE)?),
                "limit" => parsed.limit = Some(parse_positive_u32(&value, LIMIT)?),
                "author" => parsed.options.author = Some(parse_user_id(value.trim(), AUTHOR)?),
                "tags" => {
                    let slug = value.trim();
                    if !slug.is_empty() {
                        parsed.options.tags.push(slug.to_owned());
                    }
                }
                "is_favorited" => {
                    parsed.options.only_favorited = parse_flag(&value, IS_FAVORITED)?;
                }
                "is_in_shopping_cart" => {
                    parsed.options.only_in_cart = parse_flag(&value, IS_IN_SHOPPING_CART)?;
                }
                _ => {}
            }
        }
        Ok(parsed)
    }
}

/// List recipes newest first.
#[utoipa::path(
    get,
    path = "/api/recipes/",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, at most 100"),
        ("author" = Option<String>, Query, description = "Author UUID"),
        ("tags" = Option<Vec<String>>, Query, description = "Tag slugs; any match"),
        ("is_favorited" = Option<u8>, Query, description = "Only the viewer's favorites"),
        ("is_in_shopping_cart" = Option<u8>, Query, description = "Only recipes in the viewer's cart")
    ),
    responses(
        (status = 200, description = "Recipes", body = RecipeListResponse),
        (status = 400, description = "Invalid filter", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes",
    security([])
)]
#[get("/recipes/")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<RecipeListResponse>> {
    let query = ListQuery::parse(req.query_string())?;
    let request = page_request(query.page, query.limit)?;
    let viewer = session.user_id()?;
    let page = match RecipeFilter::for_viewer(viewer.as_ref(), query.options) {
        Some(filter) => state.recipes_query.list(viewer, filter, request).await?,
        None => Page::empty(request),
    };
    Ok(web::Json(RecipeListResponse::from(page)))
}

/// Create a recipe authored by the current user.
#[utoipa::path(
    post,
    path = "/api/recipes/",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Created", body = RecipeResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes/")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let view = state
        .recipes
        .create(&author, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(&view)))
}

/// Download the aggregated shopping list as CSV.
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart/",
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv", body = String),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["shopping cart"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download_shopping_cart/")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let csv = state.shopping_cart_query.export_csv(&user).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(private_no_cache_header())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(CSV_FILE_NAME.to_owned())],
        })
        .body(csv))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe",
    security([])
)]
#[get("/recipes/{id}/")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let viewer = session.user_id()?;
    let view = state
        .recipes_query
        .get(viewer, RecipeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(RecipeResponse::from(&view)))
}

async fn replace(
    state: &HttpState,
    actor: &UserId,
    id: i64,
    payload: RecipeRequest,
) -> ApiResult<web::Json<RecipeResponse>> {
    let view = state
        .recipes
        .update(actor, RecipeId::new(id), payload.into())
        .await?;
    Ok(web::Json(RecipeResponse::from(&view)))
}

/// Replace a recipe's content. Only the author may do this.
#[utoipa::path(
    patch,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated", body = RecipeResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}/")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let actor = session.require_user_id()?;
    replace(&state, &actor, path.into_inner(), payload.into_inner()).await
}

/// `PUT` alias of [`update_recipe`].
#[utoipa::path(
    put,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated", body = RecipeResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
#[put("/recipes/{id}/")]
pub async fn replace_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let actor = session.require_user_id()?;
    replace(&state, &actor, path.into_inner(), payload.into_inner()).await
}

/// Delete a recipe. Only the author may do this.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}/")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    state
        .recipes
        .delete(&actor, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Short link for sharing a recipe; generated on first request.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link/",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Short link", body = ShortLinkResponse),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipeLink",
    security([])
)]
#[get("/recipes/{id}/get-link/")]
pub async fn get_link(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ShortLinkResponse>> {
    let token = state
        .short_links
        .generate(RecipeId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ShortLinkResponse {
        short_link: state.short_link_url(&token),
    }))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
