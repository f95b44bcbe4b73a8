//! Builders shared by domain service tests.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ports::{
    FixtureFavoriteRepository, FixtureShoppingListRepository, FixtureSubscriptionRepository,
    MockUserRepository,
};
use crate::domain::{
    Amount, Ingredient, IngredientId, Recipe, RecipeId, RecipeIngredient, RecipeView, RecipeViewContext, Tag,
    TagDraft, TagId, User, UserId, UserParts,
};

pub(crate) fn user(username: &str) -> User {
    let email = format!("{username}@example.test");
    User::try_from_parts(UserParts {
        id: Uuid::new_v4(),
        email: &email,
        username,
        first_name: "Test",
        last_name: "Cook",
        avatar: None,
    })
    .expect("valid user")
}

pub(crate) fn tag(id: i64, slug: &str) -> Tag {
    Tag::new(TagDraft {
        id: TagId::new(id),
        name: slug.to_uppercase(),
        slug: slug.to_owned(),
    })
    .expect("valid tag")
}

pub(crate) fn ingredient(id: i64, name: &str, unit: &str) -> Ingredient {
    Ingredient::new(IngredientId::new(id), name, unit).expect("valid ingredient")
}

pub(crate) fn recipe(id: i64, author: &UserId) -> Recipe {
    Recipe {
        id: RecipeId::new(id),
        author: author.clone(),
        name: format!("Recipe {id}"),
        text: "Cook it.".to_owned(),
        image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
        cooking_time: 20,
        tags: vec![tag(1, "breakfast")],
        ingredients: vec![RecipeIngredient {
            ingredient: ingredient(10, "flour", "g"),
            amount: Amount::new(200).expect("positive amount"),
        }],
    }
}

/// Anonymous view of a stored recipe written by `author`.
pub(crate) fn recipe_view(id: RecipeId, author: &User) -> RecipeView {
    RecipeView {
        recipe: recipe(id.get(), author.id()),
        author: author.clone(),
        author_subscribed: false,
        is_favorited: false,
        is_in_shopping_cart: false,
    }
}

/// View context whose user lookups return `users` and whose registries are
/// empty.
pub(crate) fn views_with_users(users: Vec<User>) -> RecipeViewContext {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_ids().returning(move |ids| {
        Ok(users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    });
    RecipeViewContext::new(
        Arc::new(repo),
        Arc::new(FixtureFavoriteRepository),
        Arc::new(FixtureShoppingListRepository),
        Arc::new(FixtureSubscriptionRepository),
    )
}
