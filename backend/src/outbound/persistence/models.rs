//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Converters into domain types return
//! `Result<_, String>` so each adapter can wrap failures in its own port error.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Amount, Ingredient, IngredientId, RecipeId, RecipeSummary, Tag, TagDraft, TagId, User,
    UserParts,
};

use super::schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_list_recipes,
    shopping_lists, subscriptions, tags, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_from_parts(UserParts {
            id: row.id,
            email: &row.email,
            username: &row.username,
            first_name: &row.first_name,
            last_name: &row.last_name,
            avatar: row.avatar.as_deref(),
        })
        .map_err(|err| format!("user {}: {err}", row.id))
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = String;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Tag::new(TagDraft {
            id: TagId::new(row.id),
            name: row.name,
            slug: row.slug,
        })
        .map_err(|err| format!("tag {}: {err}", row.id))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl TryFrom<IngredientRow> for Ingredient {
    type Error = String;

    fn try_from(row: IngredientRow) -> Result<Self, Self::Error> {
        Ingredient::new(IngredientId::new(row.id), &row.name, &row.measurement_unit)
            .map_err(|err| format!("ingredient {}: {err}", row.id))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub name: &'a str,
    pub measurement_unit: &'a str,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Card-sized projection of the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeSummaryRow {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl TryFrom<RecipeSummaryRow> for RecipeSummary {
    type Error = String;

    fn try_from(row: RecipeSummaryRow) -> Result<Self, Self::Error> {
        Ok(RecipeSummary {
            id: RecipeId::new(row.id),
            cooking_time: positive(row.cooking_time, "recipes.cooking_time")?,
            name: row.name,
            image: row.image,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub author_id: Uuid,
    pub name: &'a str,
    pub text: &'a str,
    pub image: &'a str,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeUpdate<'a> {
    pub name: &'a str,
    pub text: &'a str,
    pub image: &'a str,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct NewRecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub amount: i32,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct NewRecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}

// ---------------------------------------------------------------------------
// Registries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: Uuid,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = shopping_lists)]
pub(crate) struct NewShoppingListRow {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = shopping_list_recipes)]
pub(crate) struct NewShoppingListRecipeRow {
    pub shopping_list_id: i64,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = subscriptions)]
pub(crate) struct NewSubscriptionRow {
    pub user_id: Uuid,
    pub author_id: Uuid,
}

// ---------------------------------------------------------------------------
// Integer conversions
// ---------------------------------------------------------------------------

/// Read a positive `INTEGER` column.
pub(crate) fn positive(value: i32, column: &str) -> Result<u32, String> {
    u32::try_from(value)
        .ok()
        .filter(|value| *value >= 1)
        .ok_or_else(|| format!("{column}: expected a positive value, got {value}"))
}

/// Read an amount column.
pub(crate) fn amount(value: i32) -> Result<Amount, String> {
    positive(value, "recipe_ingredients.amount")
        .and_then(|value| Amount::new(value).ok_or_else(|| format!("amount {value} out of range")))
}

/// Write a domain quantity into an `INTEGER` column.
///
/// Domain quantities are capped at `i32::MAX`, so this only fails when that
/// invariant is broken.
pub(crate) fn to_db_int(value: u32) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("value {value} exceeds INTEGER range"))
}
