//! Read-side port for tags and ingredients, plus the ingredient import write.
//!
//! Inbound adapters serve the catalogue straight from this port; recipe
//! writes use it to check that referenced tags and ingredients exist.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientDraft, IngredientId, Tag, TagId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading or importing catalogue entries.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "catalogue query failed: {message}",
    }
}

/// Outcome of importing one ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientUpsert {
    Created(Ingredient),
    Existing(Ingredient),
}

/// Port for catalogue lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Every tag ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError>;

    /// Tags among `ids` that exist.
    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    /// Ingredients ordered by name, optionally restricted to names starting
    /// with `name_prefix` (case-insensitive).
    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError>;

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError>;

    /// Ingredients among `ids` that exist.
    async fn find_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError>;

    /// Insert the ingredient unless one with the same name and unit exists.
    async fn get_or_create_ingredient(
        &self,
        draft: &IngredientDraft,
    ) -> Result<IngredientUpsert, CatalogueRepositoryError>;
}

/// Fixture catalogue with no entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueRepository;

#[async_trait]
impl CatalogueRepository for FixtureCatalogueRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_tag(&self, _id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        Ok(None)
    }

    async fn find_tags(&self, _ids: &[TagId]) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_ingredients(
        &self,
        _name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_ingredient(
        &self,
        _id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        Ok(None)
    }

    async fn find_ingredients(
        &self,
        _ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn get_or_create_ingredient(
        &self,
        draft: &IngredientDraft,
    ) -> Result<IngredientUpsert, CatalogueRepositoryError> {
        Ok(IngredientUpsert::Created(
            draft.clone().into_ingredient(IngredientId::new(0)),
        ))
    }
}

impl From<CatalogueRepositoryError> for Error {
    fn from(err: CatalogueRepositoryError) -> Self {
        match err {
            CatalogueRepositoryError::Connection { message } => Self::service_unavailable(message),
            CatalogueRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
