//! Favorites domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{FavoriteRepository, FavoritesCommand, RecipeRepository};
use crate::domain::{Error, RecipeId, RecipeSummary, UserId};

/// Favorites service implementing [`FavoritesCommand`].
#[derive(Clone)]
pub struct FavoritesService<F, R> {
    favorites: Arc<F>,
    recipes: Arc<R>,
}

impl<F, R> FavoritesService<F, R> {
    #[must_use]
    pub const fn new(favorites: Arc<F>, recipes: Arc<R>) -> Self {
        Self { favorites, recipes }
    }
}

#[async_trait]
impl<F, R> FavoritesCommand for FavoritesService<F, R>
where
    F: FavoriteRepository,
    R: RecipeRepository,
{
    async fn add(&self, user: &UserId, recipe: RecipeId) -> Result<RecipeSummary, Error> {
        let summary = self
            .recipes
            .find_summary(recipe)
            .await?
            .ok_or_else(|| Error::not_found("Recipe not found."))?;
        self.favorites
            .add(user, recipe)
            .await?
            .require_created("Recipe is already in favorites.")?;
        Ok(summary)
    }

    async fn remove(&self, user: &UserId, recipe: RecipeId) -> Result<(), Error> {
        self.recipes
            .find_summary(recipe)
            .await?
            .ok_or_else(|| Error::not_found("Recipe not found."))?;
        self.favorites
            .remove(user, recipe)
            .await?
            .require_removed("Recipe is not in favorites.")
    }
}
