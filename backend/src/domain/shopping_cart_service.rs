//! Shopping cart domain service.
//!
//! Cart membership lives in the shopping-list repository; totals are
//! recomputed from the current cart contents on every read.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    RecipeRepository, ShoppingCartCommand, ShoppingCartQuery, ShoppingListRepository,
};
use crate::domain::{
    AggregationError, Error, IngredientTotal, RecipeId, RecipeSummary, UserId,
    aggregate_ingredients, render_csv,
};

/// Shopping cart service implementing [`ShoppingCartCommand`] and
/// [`ShoppingCartQuery`].
#[derive(Clone)]
pub struct ShoppingCartService<S, R> {
    lists: Arc<S>,
    recipes: Arc<R>,
}

impl<S, R> ShoppingCartService<S, R> {
    #[must_use]
    pub const fn new(lists: Arc<S>, recipes: Arc<R>) -> Self {
        Self { lists, recipes }
    }
}

impl<S, R> ShoppingCartService<S, R>
where
    S: ShoppingListRepository,
    R: RecipeRepository,
{
    async fn summary(&self, recipe: RecipeId) -> Result<RecipeSummary, Error> {
        self.recipes
            .find_summary(recipe)
            .await?
            .ok_or_else(|| Error::not_found("Recipe not found."))
    }
}

#[async_trait]
impl<S, R> ShoppingCartCommand for ShoppingCartService<S, R>
where
    S: ShoppingListRepository,
    R: RecipeRepository,
{
    async fn add(&self, user: &UserId, recipe: RecipeId) -> Result<RecipeSummary, Error> {
        let summary = self.summary(recipe).await?;
        self.lists.ensure_list(user).await?;
        self.lists
            .add(user, recipe)
            .await?
            .require_created("Recipe is already in the shopping cart.")?;
        Ok(summary)
    }

    async fn remove(&self, user: &UserId, recipe: RecipeId) -> Result<(), Error> {
        self.summary(recipe).await?;
        self.lists
            .remove(user, recipe)
            .await?
            .require_removed("Recipe is not in the shopping cart.")
    }
}

#[async_trait]
impl<S, R> ShoppingCartQuery for ShoppingCartService<S, R>
where
    S: ShoppingListRepository,
    R: RecipeRepository,
{
    async fn totals(&self, user: &UserId) -> Result<Vec<IngredientTotal>, Error> {
        let lines = self.lists.lines(user).await?;
        aggregate_ingredients(&lines).map_err(|err: AggregationError| {
            tracing::error!(error = %err, user = %user, "shopping list totals overflowed");
            Error::internal(err.to_string())
        })
    }

    async fn export_csv(&self, user: &UserId) -> Result<String, Error> {
        let totals = self.totals(user).await?;
        Ok(render_csv(&totals))
    }
}
