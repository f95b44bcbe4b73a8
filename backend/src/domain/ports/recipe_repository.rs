//! Port abstraction for recipe persistence.
//!
//! Writes take a validated [`RecipeDraft`]; adapters store the recipe row and
//! its tag and ingredient links atomically.

use async_trait::async_trait;

use crate::domain::{
    Error, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeSummary, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

/// Newest recipes of one author plus their total count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorRecipes {
    pub recipes: Vec<RecipeSummary>,
    pub total: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe authored by `author` and return its id.
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError>;

    /// Replace fields, tags and ingredient lines. Returns `false` when the
    /// recipe no longer exists.
    async fn replace(&self, id: RecipeId, draft: &RecipeDraft)
    -> Result<bool, RecipeRepositoryError>;

    /// Delete the recipe and, via cascades, its links and memberships.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError>;

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipeRepositoryError>;

    /// Filtered page ordered newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError>;

    /// Newest recipes of `author`, truncated to `limit` when given.
    async fn author_recipes(
        &self,
        author: &UserId,
        limit: Option<u32>,
    ) -> Result<AuthorRecipes, RecipeRepositoryError>;
}

/// Fixture repository with no recipes; writes report the recipe as gone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn create(
        &self,
        _author: &UserId,
        _draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        Err(RecipeRepositoryError::connection(
            "recipe storage is not configured",
        ))
    }

    async fn replace(
        &self,
        _id: RecipeId,
        _draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }

    async fn find_by_id(&self, _id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn find_summary(
        &self,
        _id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        _filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError> {
        Ok(Page::empty(page))
    }

    async fn author_recipes(
        &self,
        _author: &UserId,
        _limit: Option<u32>,
    ) -> Result<AuthorRecipes, RecipeRepositoryError> {
        Ok(AuthorRecipes::default())
    }
}

impl From<RecipeRepositoryError> for Error {
    fn from(err: RecipeRepositoryError) -> Self {
        match err {
            RecipeRepositoryError::Connection { message } => Self::service_unavailable(message),
            RecipeRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
