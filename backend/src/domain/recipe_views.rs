//! Decorates stored recipes with their author and viewer-relative flags.
//!
//! Every lookup is batched per page: one query for authors and one each for
//! favorites, shopping-cart entries and subscriptions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::ports::{
    FavoriteRepository, ShoppingListRepository, SubscriptionRepository, UserRepository,
};
use crate::domain::{Error, Recipe, RecipeId, RecipeView, User, UserId};

/// Repositories consulted when rendering recipes for a viewer.
#[derive(Clone)]
pub struct RecipeViewContext {
    users: Arc<dyn UserRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    shopping_lists: Arc<dyn ShoppingListRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl RecipeViewContext {
    #[must_use]
    pub const fn new(
        users: Arc<dyn UserRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        shopping_lists: Arc<dyn ShoppingListRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            favorites,
            shopping_lists,
            subscriptions,
        }
    }

    /// Decorate `recipes` for `viewer`, preserving their order.
    pub async fn decorate(
        &self,
        viewer: Option<&UserId>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, Error> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let recipe_ids: Vec<RecipeId> = recipes.iter().map(|recipe| recipe.id).collect();
        let mut author_ids: Vec<UserId> = Vec::new();
        for recipe in &recipes {
            if !author_ids.contains(&recipe.author) {
                author_ids.push(recipe.author.clone());
            }
        }

        let authors: HashMap<UserId, User> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        let flags = match viewer {
            Some(viewer) => ViewerFlags {
                favorited: self
                    .favorites
                    .favorited_among(viewer, &recipe_ids)
                    .await?
                    .into_iter()
                    .collect(),
                in_cart: self
                    .shopping_lists
                    .in_cart_among(viewer, &recipe_ids)
                    .await?
                    .into_iter()
                    .collect(),
                subscribed: self
                    .subscriptions
                    .subscribed_among(viewer, &author_ids)
                    .await?
                    .into_iter()
                    .collect(),
            },
            None => ViewerFlags::default(),
        };

        recipes
            .into_iter()
            .map(|recipe| {
                let author = authors.get(&recipe.author).cloned().ok_or_else(|| {
                    Error::internal(format!("author of recipe {} is missing", recipe.id))
                })?;
                Ok(RecipeView {
                    author_subscribed: flags.subscribed.contains(&recipe.author),
                    is_favorited: flags.favorited.contains(&recipe.id),
                    is_in_shopping_cart: flags.in_cart.contains(&recipe.id),
                    author,
                    recipe,
                })
            })
            .collect()
    }

    /// Decorate a single recipe.
    pub async fn decorate_one(
        &self,
        viewer: Option<&UserId>,
        recipe: Recipe,
    ) -> Result<RecipeView, Error> {
        let id = recipe.id;
        self.decorate(viewer, vec![recipe])
            .await?
            .pop()
            .ok_or_else(|| Error::internal(format!("recipe {id} vanished while rendering")))
    }
}

#[derive(Default)]
struct ViewerFlags {
    favorited: HashSet<RecipeId>,
    in_cart: HashSet<RecipeId>,
    subscribed: HashSet<UserId>,
}
