//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Users provisioned by the authentication collaborator.
    users (id) {
        id -> Uuid,
        #[max_length = 254]
        email -> Varchar,
        #[max_length = 150]
        username -> Varchar,
        #[max_length = 150]
        first_name -> Varchar,
        #[max_length = 150]
        last_name -> Varchar,
        created_at -> Timestamptz,
        avatar -> Nullable<Text>,
    }
}

diesel::table! {
    tags (id) {
        id -> Int8,
        #[max_length = 150]
        name -> Varchar,
        /// Unique URL-safe identifier used by recipe filters.
        #[max_length = 50]
        slug -> Varchar,
    }
}

diesel::table! {
    /// Ingredient reference data; `(name, measurement_unit)` is unique.
    ingredients (id) {
        id -> Int8,
        #[max_length = 150]
        name -> Varchar,
        #[max_length = 150]
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    recipes (id) {
        id -> Int8,
        author_id -> Uuid,
        #[max_length = 150]
        name -> Varchar,
        text -> Text,
        /// Base64 data URI stored verbatim.
        image -> Text,
        cooking_time -> Int4,
        /// Unique short-link token, assigned on first request.
        #[max_length = 6]
        short_link -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Int8,
        ingredient_id -> Int8,
        amount -> Int4,
    }
}

diesel::table! {
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    favorites (user_id, recipe_id) {
        user_id -> Uuid,
        recipe_id -> Int8,
    }
}

diesel::table! {
    /// One list per user.
    shopping_lists (id) {
        id -> Int8,
        user_id -> Uuid,
    }
}

diesel::table! {
    shopping_list_recipes (shopping_list_id, recipe_id) {
        shopping_list_id -> Int8,
        recipe_id -> Int8,
    }
}

diesel::table! {
    /// `user_id` follows `author_id`; self-subscription is rejected by a
    /// `CHECK` constraint.
    subscriptions (user_id, author_id) {
        user_id -> Uuid,
        author_id -> Uuid,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(shopping_lists -> users (user_id));
diesel::joinable!(shopping_list_recipes -> shopping_lists (shopping_list_id));
diesel::joinable!(shopping_list_recipes -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_ingredients,
    recipe_tags,
    favorites,
    shopping_lists,
    shopping_list_recipes,
    subscriptions,
);
