//! Driving port for recipe writes.
//!
//! Inbound adapters hand over the raw payload; implementations validate it,
//! enforce authorship and return the stored recipe as the author sees it.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, RecipeInput, RecipeView, UserId};

/// Domain use-case port for creating, replacing and deleting recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Create a recipe authored by `author`.
    async fn create(&self, author: &UserId, input: RecipeInput) -> Result<RecipeView, Error>;

    /// Replace a recipe. Only its author may do so.
    async fn update(
        &self,
        actor: &UserId,
        id: RecipeId,
        input: RecipeInput,
    ) -> Result<RecipeView, Error>;

    /// Delete a recipe. Only its author may do so.
    async fn delete(&self, actor: &UserId, id: RecipeId) -> Result<(), Error>;
}
