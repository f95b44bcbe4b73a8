//! PostgreSQL-backed `ShoppingListRepository` implementation.
//!
//! Each user owns at most one `shopping_lists` row; recipes are linked to it
//! through `shopping_list_recipes`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ShoppingListRepository, ShoppingListRepositoryError};
use crate::domain::{CartLine, Ingredient, MembershipAdd, MembershipRemoval, RecipeId, UserId};

use super::diesel_helpers::{
    collect_rows, is_connection_error, map_diesel_error_message, map_pool_error_message,
};
use super::models::{IngredientRow, NewShoppingListRecipeRow, NewShoppingListRow, amount};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients, shopping_list_recipes, shopping_lists};

/// Diesel-backed shopping list store.
#[derive(Clone)]
pub struct DieselShoppingListRepository {
    pool: DbPool,
}

impl DieselShoppingListRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ShoppingListRepositoryError {
    ShoppingListRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ShoppingListRepositoryError {
    if is_connection_error(&error) {
        ShoppingListRepositoryError::connection(map_diesel_error_message(error, "shopping list"))
    } else {
        ShoppingListRepositoryError::query(map_diesel_error_message(error, "shopping list"))
    }
}

async fn list_id(
    conn: &mut AsyncPgConnection,
    user: &UserId,
) -> Result<Option<i64>, ShoppingListRepositoryError> {
    shopping_lists::table
        .filter(shopping_lists::user_id.eq(*user.as_uuid()))
        .select(shopping_lists::id)
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

#[async_trait]
impl ShoppingListRepository for DieselShoppingListRepository {
    async fn ensure_list(&self, user: &UserId) -> Result<(), ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(shopping_lists::table)
            .values(&NewShoppingListRow {
                user_id: *user.as_uuid(),
            })
            .on_conflict(shopping_lists::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(list) = list_id(&mut conn, user).await? else {
            return Err(ShoppingListRepositoryError::query(format!(
                "no shopping list for user {user}"
            )));
        };
        let inserted = diesel::insert_into(shopping_list_recipes::table)
            .values(&NewShoppingListRecipeRow {
                shopping_list_id: list,
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
    ) -> Result<MembershipRemoval, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(list) = list_id(&mut conn, user).await? else {
            return Ok(MembershipRemoval::NotFound);
        };
        let deleted = diesel::delete(
            shopping_list_recipes::table
                .filter(shopping_list_recipes::shopping_list_id.eq(list))
                .filter(shopping_list_recipes::recipe_id.eq(recipe.get())),
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

    async fn in_cart_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, ShoppingListRepositoryError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = recipes.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<i64> = shopping_list_recipes::table
            .inner_join(shopping_lists::table)
            .filter(shopping_lists::user_id.eq(*user.as_uuid()))
            .filter(shopping_list_recipes::recipe_id.eq_any(ids))
            .select(shopping_list_recipes::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(RecipeId::new).collect())
    }

    async fn lines(&self, user: &UserId) -> Result<Vec<CartLine>, ShoppingListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let in_cart = shopping_list_recipes::table
            .inner_join(shopping_lists::table)
            .filter(shopping_lists::user_id.eq(*user.as_uuid()))
            .select(shopping_list_recipes::recipe_id);
        let rows: Vec<(i64, i32, IngredientRow)> = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(in_cart))
            .select((
                recipe_ingredients::recipe_id,
                recipe_ingredients::amount,
                IngredientRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(
            rows.into_iter().map(|(recipe_id, raw_amount, row)| {
                Ok(CartLine {
                    recipe: RecipeId::new(recipe_id),
                    amount: amount(raw_amount)?,
                    ingredient: Ingredient::try_from(row)?,
                })
            }),
            ShoppingListRepositoryError::query,
        )
    }
}
