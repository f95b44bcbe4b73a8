//! Driving port for recipe reads.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, RecipeFilter, RecipeId, RecipeView, UserId};

/// Domain use-case port for reading recipes. `viewer` is `None` for
/// anonymous requests; viewer-relative flags are then `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    async fn get(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error>;

    /// Filtered page, newest first.
    async fn list(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, Error>;
}
