//! Public short-link redirect.
//!
//! ```text
//! GET /s/{token}/  ->  302 Location: <base_url>/recipes/<id>/
//! ```
//!
//! Mounted outside `/api`; tokens are handed out by
//! [`super::recipes::get_link`].

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Redirect a short link to its recipe page.
#[utoipa::path(
    get,
    path = "/s/{token}/",
    params(("token" = String, Path, description = "Six-character short-link token")),
    responses(
        (status = 302, description = "Redirect to the recipe page", headers(("Location" = String))),
        (status = 404, description = "Unknown or malformed token", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "resolveShortLink",
    security([])
)]
#[get("/s/{token}/")]
pub async fn resolve_short_link(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe = state.short_links_query.resolve(&path.into_inner()).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, state.recipe_url(recipe)))
        .finish())
}
