//! Driving port for favoriting recipes.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeSummary, UserId};

/// Domain use-case port for the favorites registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Favorite `recipe`. Fails with `not_found` for unknown recipes and
    /// `already_exists` for duplicates.
    async fn add(&self, user: &UserId, recipe: RecipeId) -> Result<RecipeSummary, Error>;

    /// Unfavorite `recipe`. Fails with `not_found` when it was not favorited.
    async fn remove(&self, user: &UserId, recipe: RecipeId) -> Result<(), Error>;
}
