//! PostgreSQL-backed `ShortLinkRepository` implementation.
//!
//! Tokens live in the nullable, unique `recipes.short_link` column. A claim
//! is one conditional `UPDATE`, so concurrent generators cannot overwrite
//! each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ShortLinkRepository, ShortLinkRepositoryError, ShortLinkSubject};
use crate::domain::{RecipeId, ShortLinkClaim, ShortLinkToken};

use super::diesel_helpers::{
    is_connection_error, is_unique_violation, map_diesel_error_message, map_pool_error_message,
};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed short-link store.
#[derive(Clone)]
pub struct DieselShortLinkRepository {
    pool: DbPool,
}

impl DieselShortLinkRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShortLinkRepositoryError {
    ShortLinkRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ShortLinkRepositoryError {
    if is_connection_error(&error) {
        ShortLinkRepositoryError::connection(map_diesel_error_message(error, "short link"))
    } else {
        ShortLinkRepositoryError::query(map_diesel_error_message(error, "short link"))
    }
}

fn parse_stored(recipe: i64, raw: &str) -> Result<ShortLinkToken, ShortLinkRepositoryError> {
    ShortLinkToken::parse(raw).map_err(|err| {
        ShortLinkRepositoryError::query(format!("recipe {recipe} has malformed short link: {err}"))
    })
}

async fn load_subject(
    conn: &mut AsyncPgConnection,
    recipe: i64,
) -> Result<Option<(String, Option<String>)>, ShortLinkRepositoryError> {
    recipes::table
        .filter(recipes::id.eq(recipe))
        .select((recipes::name, recipes::short_link))
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

#[async_trait]
impl ShortLinkRepository for DieselShortLinkRepository {
    async fn find_subject(
        &self,
        recipe: RecipeId,
    ) -> Result<Option<ShortLinkSubject>, ShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some((name, stored)) = load_subject(&mut conn, recipe.get()).await? else {
            return Ok(None);
        };
        let token = stored
            .as_deref()
            .map(|raw| parse_stored(recipe.get(), raw))
            .transpose()?;
        Ok(Some(ShortLinkSubject { name, token }))
    }

    async fn claim(
        &self,
        recipe: RecipeId,
        token: &ShortLinkToken,
    ) -> Result<ShortLinkClaim, ShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            recipes::table
                .filter(recipes::id.eq(recipe.get()))
                .filter(recipes::short_link.is_null()),
        )
        .set(recipes::short_link.eq(token.as_str()))
        .execute(&mut conn)
        .await;

        match updated {
            Ok(0) => {}
            Ok(_) => return Ok(ShortLinkClaim::Claimed),
            Err(err) if is_unique_violation(&err) => return Ok(ShortLinkClaim::Taken),
            Err(err) => return Err(map_diesel_error(err)),
        }

        // Either the recipe vanished or another request assigned a token first.
        match load_subject(&mut conn, recipe.get()).await? {
            Some((_, Some(existing))) => Ok(ShortLinkClaim::AlreadyAssigned(parse_stored(
                recipe.get(),
                &existing,
            )?)),
            Some((_, None)) | None => Err(ShortLinkRepositoryError::query(format!(
                "recipe {} disappeared while claiming a short link",
                recipe.get()
            ))),
        }
    }

    async fn resolve(
        &self,
        token: &ShortLinkToken,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Option<i64> = recipes::table
            .filter(recipes::short_link.eq(token.as_str()))
            .select(recipes::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(RecipeId::new))
    }
}
