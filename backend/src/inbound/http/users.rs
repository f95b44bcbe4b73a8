//! User profile and subscription handlers.
//!
//! ```text
//! GET    /api/users/me/
//! PUT    /api/users/me/avatar/
//! DELETE /api/users/me/avatar/
//! GET    /api/users/subscriptions/?page=1&limit=6&recipes_limit=3
//! GET    /api/users/{id}/
//! POST   /api/users/{id}/subscribe/?recipes_limit=3
//! DELETE /api/users/{id}/subscribe/
//! ```
//!
//! `/users/me/` and `/users/subscriptions/` must be registered before
//! `/users/{id}/` so the literal segments win.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, ImageData};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{
    AvatarRequest, AvatarResponse, SubscribedAuthorResponse, SubscriptionListResponse,
    UserResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, LIMIT, PAGE, RECIPES_LIMIT, page_request, parse_optional_u32, parse_user_id,
};

const USER_ID: FieldName = FieldName::new("id");

/// Query parameters for the subscription list.
///
/// Values stay strings so validation can name the offending field.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub recipes_limit: Option<String>,
}

/// Query parameters for `subscribe`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<String>,
}

/// Current user's profile.
#[utoipa::path(
    get,
    path = "/api/users/me/",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "User record missing", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me/")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let profile = state.users.profile(Some(me.clone()), &me).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(UserResponse::from(&profile)))
}

/// Upload or replace the current user's avatar.
#[utoipa::path(
    put,
    path = "/api/users/me/avatar/",
    request_body = AvatarRequest,
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Not a base64 image data URI", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "setAvatar"
)]
#[put("/users/me/avatar/")]
pub async fn set_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AvatarRequest>,
) -> ApiResult<web::Json<AvatarResponse>> {
    let me = session.require_user_id()?;
    let avatar = ImageData::parse(payload.into_inner().avatar).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "avatar", "code": "invalid_image" }))
    })?;
    let stored = state.avatars.set_avatar(&me, avatar).await?;
    Ok(web::Json(AvatarResponse {
        avatar: stored.into(),
    }))
}

/// Remove the current user's avatar.
#[utoipa::path(
    delete,
    path = "/api/users/me/avatar/",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 400, description = "Avatar not set", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAvatar"
)]
#[delete("/users/me/avatar/")]
pub async fn delete_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    state.avatars.clear_avatar(&me).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Authors the current user follows, each with a preview of their recipes.
#[utoipa::path(
    get,
    path = "/api/users/subscriptions/",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size, at most 100"),
        ("recipes_limit" = Option<u32>, Query, description = "Recipes shown per author")
    ),
    responses(
        (status = 200, description = "Followed authors", body = SubscriptionListResponse),
        (status = 400, description = "Invalid paging parameters", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions"
)]
#[get("/users/subscriptions/")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SubscriptionListQuery>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let query = query.into_inner();
    let page = parse_optional_u32(query.page.as_deref(), PAGE)?;
    let limit = parse_optional_u32(query.limit.as_deref(), LIMIT)?;
    let per_author = parse_optional_u32(query.recipes_limit.as_deref(), RECIPES_LIMIT)?;
    let request = page_request(page, limit)?;
    let authors = state
        .subscriptions_query
        .list(&me, request, per_author)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(SubscriptionListResponse::from(authors)))
}

/// Public profile of any user.
#[utoipa::path(
    get,
    path = "/api/users/{id}/",
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}/")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner(), USER_ID)?;
    let viewer = session.user_id()?;
    let profile = state.users.profile(viewer, &id).await?;
    Ok(web::Json(UserResponse::from(&profile)))
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe/",
    params(
        ("id" = String, Path, description = "Author UUID"),
        ("recipes_limit" = Option<u32>, Query, description = "Recipes shown in the response")
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscribedAuthorResponse),
        (status = 400, description = "Self-subscription or already subscribed", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown author", body = Error)
    ),
    tags = ["users"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe/")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<RecipesLimitQuery>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let author = parse_user_id(&path.into_inner(), USER_ID)?;
    let limit = parse_optional_u32(query.recipes_limit.as_deref(), RECIPES_LIMIT)?;
    let subscribed = state.subscriptions.subscribe(&me, &author, limit).await?;
    Ok(HttpResponse::Created().json(SubscribedAuthorResponse::from(&subscribed)))
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe/",
    params(("id" = String, Path, description = "Author UUID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Not subscribed", body = Error)
    ),
    tags = ["users"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe/")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let me = session.require_user_id()?;
    let author = parse_user_id(&path.into_inner(), USER_ID)?;
    state.subscriptions.unsubscribe(&me, &author).await?;
    Ok(HttpResponse::NoContent().finish())
}
