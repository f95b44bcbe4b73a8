//! PostgreSQL-backed `FavoriteRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{MembershipAdd, MembershipRemoval, RecipeId, UserId};

use super::diesel_helpers::{is_connection_error, map_diesel_error_message, map_pool_error_message};
use super::models::NewFavoriteRow;
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed favorites registry.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoriteRepositoryError {
    FavoriteRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    if is_connection_error(&error) {
        FavoriteRepositoryError::connection(map_diesel_error_message(error, "favorite"))
    } else {
        FavoriteRepositoryError::query(map_diesel_error_message(error, "favorite"))
    }
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(favorites::table)
            .values(&NewFavoriteRow {
                user_id: *user.as_uuid(),
                recipe_id: recipe.get(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(if inserted > 0 {
            MembershipAdd::Created
        } else {
            MembershipAdd::AlreadyExists
        })
    }

    async fn remove(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipRemoval, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(*user.as_uuid()))
                .filter(favorites::recipe_id.eq(recipe.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(if deleted > 0 {
            MembershipRemoval::Removed
        } else {
            MembershipRemoval::NotFound
        })
    }

    async fn favorited_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, FavoriteRepositoryError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = favorites::table
            .filter(favorites::user_id.eq(*user.as_uuid()))
            .filter(favorites::recipe_id.eq_any(ids))
            .select(favorites::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(RecipeId::new).collect())
    }
}
