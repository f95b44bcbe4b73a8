//! Driving port for changing the recipes in a shopping list.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeSummary, UserId};

/// Domain use-case port for the shopping cart registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartCommand: Send + Sync {
    /// Put `recipe` on the user's list, creating the list on first use.
    async fn add(&self, user: &UserId, recipe: RecipeId) -> Result<RecipeSummary, Error>;

    async fn remove(&self, user: &UserId, recipe: RecipeId) -> Result<(), Error>;
}
