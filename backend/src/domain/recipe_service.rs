//! Recipe domain service.
//!
//! Implements the recipe driving ports: payload validation, reference checks
//! against the catalogue, authorship enforcement and view decoration.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{CatalogueRepository, RecipeCommand, RecipeQuery, RecipeRepository};
use crate::domain::{
    Error, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeInput,
    RecipeValidationError, RecipeView, RecipeViewContext, UserId,
};

const RECIPE_NOT_FOUND: &str = "Recipe not found.";

fn map_validation_error(error: RecipeValidationError) -> Error {
    let mut details = json!({
        "field": error.field(),
        "code": error.code(),
    });
    match &error {
        RecipeValidationError::AmountOutOfRange { index, value } => {
            details["index"] = json!(index);
            details["value"] = json!(value);
        }
        RecipeValidationError::CookingTimeOutOfRange { value } => {
            details["value"] = json!(value);
        }
        RecipeValidationError::DuplicateIngredient { id } => {
            details["value"] = json!(id.get());
        }
        _ => {}
    }
    Error::invalid_request(error.to_string()).with_details(details)
}

fn unknown_references(field: &str, message: &str, missing: Vec<i64>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "unknown",
        "value": missing,
    }))
}

/// Recipe service implementing [`RecipeCommand`] and [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeService<R, C> {
    recipes: Arc<R>,
    catalogue: Arc<C>,
    views: RecipeViewContext,
}

impl<R, C> RecipeService<R, C> {
    #[must_use]
    pub const fn new(recipes: Arc<R>, catalogue: Arc<C>, views: RecipeViewContext) -> Self {
        Self {
            recipes,
            catalogue,
            views,
        }
    }
}

impl<R, C> RecipeService<R, C>
where
    R: RecipeRepository,
    C: CatalogueRepository,
{
    /// Reject drafts pointing at tags or ingredients that do not exist.
    async fn ensure_references(&self, draft: &RecipeDraft) -> Result<(), Error> {
        let found: HashSet<_> = self
            .catalogue
            .find_tags(draft.tags())
            .await?
            .iter()
            .map(|tag| tag.id())
            .collect();
        let missing: Vec<i64> = draft
            .tags()
            .iter()
            .filter(|id| !found.contains(*id))
            .map(|id| id.get())
            .collect();
        if !missing.is_empty() {
            return Err(unknown_references(
                "tags",
                "One or more tags do not exist.",
                missing,
            ));
        }

        let ingredient_ids = draft.ingredient_ids();
        let found: HashSet<_> = self
            .catalogue
            .find_ingredients(&ingredient_ids)
            .await?
            .iter()
            .map(|ingredient| ingredient.id())
            .collect();
        let missing: Vec<i64> = ingredient_ids
            .iter()
            .filter(|id| !found.contains(*id))
            .map(|id| id.get())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(unknown_references(
                "ingredients",
                "One or more ingredients do not exist.",
                missing,
            ))
        }
    }

    async fn load(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(RECIPE_NOT_FOUND))
    }

    /// Load a recipe the actor is allowed to change.
    async fn load_owned(&self, actor: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        let recipe = self.load(id).await?;
        if &recipe.author != actor {
            return Err(Error::forbidden(
                "Only the author can change this recipe.",
            ));
        }
        Ok(recipe)
    }

    async fn validated(&self, input: RecipeInput) -> Result<RecipeDraft, Error> {
        let draft = RecipeDraft::new(input).map_err(map_validation_error)?;
        self.ensure_references(&draft).await?;
        Ok(draft)
    }
}

#[async_trait]
impl<R, C> RecipeCommand for RecipeService<R, C>
where
    R: RecipeRepository,
    C: CatalogueRepository,
{
    async fn create(&self, author: &UserId, input: RecipeInput) -> Result<RecipeView, Error> {
        let draft = self.validated(input).await?;
        let id = self.recipes.create(author, &draft).await?;
        tracing::info!(recipe_id = %id, author = %author, "recipe created");
        let recipe = self.recipes.find_by_id(id).await?.ok_or_else(|| {
            Error::internal(format!("recipe {id} missing right after creation"))
        })?;
        self.views.decorate_one(Some(author), recipe).await
    }

    async fn update(
        &self,
        actor: &UserId,
        id: RecipeId,
        input: RecipeInput,
    ) -> Result<RecipeView, Error> {
        self.load_owned(actor, id).await?;
        let draft = self.validated(input).await?;
        if !self.recipes.replace(id, &draft).await? {
            return Err(Error::not_found(RECIPE_NOT_FOUND));
        }
        tracing::info!(recipe_id = %id, "recipe replaced");
        let recipe = self.load(id).await?;
        self.views.decorate_one(Some(actor), recipe).await
    }

    async fn delete(&self, actor: &UserId, id: RecipeId) -> Result<(), Error> {
        self.load_owned(actor, id).await?;
        if !self.recipes.delete(id).await? {
            return Err(Error::not_found(RECIPE_NOT_FOUND));
        }
        tracing::info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, C> RecipeQuery for RecipeService<R, C>
where
    R: RecipeRepository,
    C: CatalogueRepository,
{
    async fn get(&self, viewer: Option<UserId>, id: RecipeId) -> Result<RecipeView, Error> {
        let recipe = self.load(id).await?;
        self.views.decorate_one(viewer.as_ref(), recipe).await
    }

    async fn list(
        &self,
        viewer: Option<UserId>,
        filter: RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, Error> {
        let Page {
            items,
            total,
            request,
        } = self.recipes.list(&filter, page).await?;
        let items = self.views.decorate(viewer.as_ref(), items).await?;
        Ok(Page {
            items,
            total,
            request,
        })
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
