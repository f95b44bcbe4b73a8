//! PostgreSQL-backed catalogue adapter for tags and ingredients.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError, IngredientUpsert};
use crate::domain::{Ingredient, IngredientDraft, IngredientId, Tag, TagId};

use super::diesel_helpers::{
    collect_rows, is_connection_error, like_prefix_pattern, map_diesel_error_message,
    map_pool_error_message,
};
use super::models::{IngredientRow, NewIngredientRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

/// Diesel-backed implementation of the catalogue port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    CatalogueRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    if is_connection_error(&error) {
        CatalogueRepositoryError::connection(map_diesel_error_message(error, "catalogue"))
    } else {
        CatalogueRepositoryError::query(map_diesel_error_message(error, "catalogue"))
    }
}

fn to_tags(rows: Vec<TagRow>) -> Result<Vec<Tag>, CatalogueRepositoryError> {
    collect_rows(rows.into_iter().map(Tag::try_from), CatalogueRepositoryError::query)
}

fn to_ingredients(rows: Vec<IngredientRow>) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
    collect_rows(
        rows.into_iter().map(Ingredient::try_from),
        CatalogueRepositoryError::query,
    )
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order_by((tags::name, tags::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_tags(rows)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TagRow> = tags::table
            .filter(tags::id.eq(id.get()))
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Tag::try_from)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TagRow> = tags::table
            .filter(tags::id.eq_any(raw))
            .select(TagRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_tags(rows)
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order_by((ingredients::name, ingredients::id))
            .into_boxed();
        if let Some(prefix) = name_prefix.as_deref().filter(|prefix| !prefix.is_empty()) {
            query = query.filter(ingredients::name.ilike(like_prefix_pattern(prefix)));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IngredientRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        to_ingredients(rows)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq(id.get()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Ingredient::try_from)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IngredientRow> = ingredients::table
            .filter(ingredients::id.eq_any(raw))
            .select(IngredientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_ingredients(rows)
    }

    async fn get_or_create_ingredient(
        &self,
        draft: &IngredientDraft,
    ) -> Result<IngredientUpsert, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted: Option<IngredientRow> = diesel::insert_into(ingredients::table)
            .values(&NewIngredientRow {
                name: draft.name(),
                measurement_unit: draft.measurement_unit(),
            })
            .on_conflict((ingredients::name, ingredients::measurement_unit))
            .do_nothing()
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        if let Some(row) = inserted {
            return Ingredient::try_from(row)
                .map(IngredientUpsert::Created)
                .map_err(CatalogueRepositoryError::query);
        }

        let existing: IngredientRow = ingredients::table
            .filter(ingredients::name.eq(draft.name()))
            .filter(ingredients::measurement_unit.eq(draft.measurement_unit()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ingredient::try_from(existing)
            .map(IngredientUpsert::Existing)
            .map_err(CatalogueRepositoryError::query)
    }
}
