//! PostgreSQL-backed `RecipeRepository` implementation.
//!
//! Recipe rows and their tag and ingredient links are written in one
//! transaction. Reads hydrate a page of recipes with two batched queries.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{AuthorRecipes, RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Ingredient, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeId, RecipeIngredient,
    RecipeSummary, Tag, UserId,
};

use super::diesel_helpers::{
    collect_rows, count_to_u64, is_connection_error, map_diesel_error_message,
    map_pool_error_message,
};
use super::models::{
    IngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeTagRow, RecipeRow,
    RecipeSummaryRow, RecipeUpdate, TagRow, amount, positive, to_db_int,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_list_recipes,
    shopping_lists, tags,
};

/// Diesel-backed implementation of the recipe port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    if is_connection_error(&error) {
        RecipeRepositoryError::connection(map_diesel_error_message(error, "recipe"))
    } else {
        RecipeRepositoryError::query(map_diesel_error_message(error, "recipe"))
    }
}

/// Column values shared by inserts and updates.
struct DraftColumns<'a> {
    name: &'a str,
    text: &'a str,
    image: &'a str,
    cooking_time: i32,
    tag_ids: Vec<i64>,
    ingredient_amounts: Vec<(i64, i32)>,
}

impl<'a> DraftColumns<'a> {
    fn from_draft(draft: &'a RecipeDraft) -> Result<Self, RecipeRepositoryError> {
        let ingredient_amounts = draft
            .ingredients()
            .iter()
            .map(|line| Ok((line.ingredient.get(), to_db_int(line.amount.get())?)))
            .collect::<Result<Vec<_>, String>>()
            .map_err(RecipeRepositoryError::query)?;
        Ok(Self {
            name: draft.name(),
            text: draft.text(),
            image: draft.image().as_str(),
            cooking_time: to_db_int(draft.cooking_time()).map_err(RecipeRepositoryError::query)?,
            tag_ids: draft.tags().iter().map(|id| id.get()).collect(),
            ingredient_amounts,
        })
    }

    fn tag_rows(&self, recipe_id: i64) -> Vec<NewRecipeTagRow> {
        self.tag_ids
            .iter()
            .map(|tag_id| NewRecipeTagRow {
                recipe_id,
                tag_id: *tag_id,
            })
            .collect()
    }

    fn ingredient_rows(&self, recipe_id: i64) -> Vec<NewRecipeIngredientRow> {
        self.ingredient_amounts
            .iter()
            .map(|(ingredient_id, amount)| NewRecipeIngredientRow {
                recipe_id,
                ingredient_id: *ingredient_id,
                amount: *amount,
            })
            .collect()
    }
}

type RecipeQuery<'a> = recipes::BoxedQuery<'a, Pg>;

/// Recipes matching `filter`, without ordering or paging.
fn filtered(filter: &RecipeFilter) -> RecipeQuery<'static> {
    let mut query = recipes::table.into_boxed();
    if let Some(author) = &filter.author {
        query = query.filter(recipes::author_id.eq(*author.as_uuid()));
    }
    if !filter.tags.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(filter.tags.clone()))
            .select(recipe_tags::recipe_id);
        query = query.filter(recipes::id.eq_any(tagged));
    }
    if let Some(user) = &filter.favorited_by {
        let favorited = favorites::table
            .filter(favorites::user_id.eq(*user.as_uuid()))
            .select(favorites::recipe_id);
        query = query.filter(recipes::id.eq_any(favorited));
    }
    if let Some(user) = &filter.in_cart_of {
        let in_cart = shopping_list_recipes::table
            .inner_join(shopping_lists::table)
            .filter(shopping_lists::user_id.eq(*user.as_uuid()))
            .select(shopping_list_recipes::recipe_id);
        query = query.filter(recipes::id.eq_any(in_cart));
    }
    query
}

/// Attach tags and ingredient lines to `rows`, preserving their order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

    let tag_rows: Vec<(i64, TagRow)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(ids.clone()))
        .select((recipe_tags::recipe_id, TagRow::as_select()))
        .order_by((recipe_tags::recipe_id, tags::name))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let line_rows: Vec<(i64, i32, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(ids))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::amount,
            IngredientRow::as_select(),
        ))
        .order_by((recipe_ingredients::recipe_id, ingredients::name))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (recipe_id, row) in tag_rows {
        let tag = Tag::try_from(row).map_err(RecipeRepositoryError::query)?;
        tags_by_recipe.entry(recipe_id).or_default().push(tag);
    }
    let mut lines_by_recipe: HashMap<i64, Vec<RecipeIngredient>> = HashMap::new();
    for (recipe_id, raw_amount, row) in line_rows {
        let line = RecipeIngredient {
            ingredient: Ingredient::try_from(row).map_err(RecipeRepositoryError::query)?,
            amount: amount(raw_amount).map_err(RecipeRepositoryError::query)?,
        };
        lines_by_recipe.entry(recipe_id).or_default().push(line);
    }

    collect_rows(
        rows.into_iter().map(|row| {
            Ok(Recipe {
                id: RecipeId::new(row.id),
                author: UserId::from_uuid(row.author_id),
                cooking_time: positive(row.cooking_time, "recipes.cooking_time")?,
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                ingredients: lines_by_recipe.remove(&row.id).unwrap_or_default(),
                name: row.name,
                text: row.text,
                image: row.image,
            })
        }),
        RecipeRepositoryError::query,
    )
}

fn to_summaries(rows: Vec<RecipeSummaryRow>) -> Result<Vec<RecipeSummary>, RecipeRepositoryError> {
    collect_rows(
        rows.into_iter().map(RecipeSummary::try_from),
        RecipeRepositoryError::query,
    )
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let columns = DraftColumns::from_draft(draft)?;
        let author_id = *author.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(recipes::table)
                        .values(&NewRecipeRow {
                            author_id,
                            name: columns.name,
                            text: columns.text,
                            image: columns.image,
                            cooking_time: columns.cooking_time,
                        })
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;
                    diesel::insert_into(recipe_tags::table)
                        .values(&columns.tag_rows(id))
                        .execute(conn)
                        .await?;
                    diesel::insert_into(recipe_ingredients::table)
                        .values(&columns.ingredient_rows(id))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(RecipeId::new(id))
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let columns = DraftColumns::from_draft(draft)?;
        let recipe_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(recipes::table.filter(recipes::id.eq(recipe_id)))
                    .set(&RecipeUpdate {
                        name: columns.name,
                        text: columns.text,
                        image: columns.image,
                        cooking_time: columns.cooking_time,
                    })
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }
                diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                diesel::insert_into(recipe_tags::table)
                    .values(&columns.tag_rows(recipe_id))
                    .execute(conn)
                    .await?;
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                diesel::insert_into(recipe_ingredients::table)
                    .values(&columns.ingredient_rows(recipe_id))
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.filter(recipes::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.get()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(hydrate(&mut conn, vec![row]).await?.pop())
    }

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RecipeSummaryRow> = recipes::table
            .filter(recipes::id.eq(id.get()))
            .select(RecipeSummaryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(RecipeSummary::try_from)
            .transpose()
            .map_err(RecipeRepositoryError::query)
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let offset = i64::try_from(page.offset()).map_err(|_| {
            RecipeRepositoryError::query(format!("page offset {} too large", page.offset()))
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RecipeRow> = filtered(filter)
            .select(RecipeRow::as_select())
            .order_by(recipes::id.desc())
            .limit(i64::from(page.limit()))
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page {
            items: hydrate(&mut conn, rows).await?,
            total: count_to_u64(total),
            request: page,
        })
    }

    async fn author_recipes(
        &self,
        author: &UserId,
        limit: Option<u32>,
    ) -> Result<AuthorRecipes, RecipeRepositoryError> {
        let author_id = *author.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = recipes::table
            .filter(recipes::author_id.eq(author_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut query = recipes::table
            .filter(recipes::author_id.eq(author_id))
            .select(RecipeSummaryRow::as_select())
            .order_by(recipes::id.desc())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::from(limit));
        }
        let rows: Vec<RecipeSummaryRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        Ok(AuthorRecipes {
            recipes: to_summaries(rows)?,
            total: count_to_u64(total),
        })
    }
}
