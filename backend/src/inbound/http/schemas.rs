//! Response payloads shared by several handlers.
//!
//! Domain types stay free of serde and utoipa derives; these wrappers define
//! the JSON shape clients see and register it with the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Ingredient, IngredientTotal, Page, RecipeSummary, RecipeView, SubscribedAuthor, Tag, User,
    UserProfile,
};

/// Tag as listed by `/api/tags/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().get(),
            name: tag.name().to_owned(),
            slug: tag.slug().to_owned(),
        }
    }
}

/// Catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "flour")]
    pub name: String,
    #[schema(example = "g")]
    pub measurement_unit: String,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id().get(),
            name: ingredient.name().to_owned(),
            measurement_unit: ingredient.measurement_unit().to_owned(),
        }
    }
}

/// Public user card with the viewer's subscription flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    pub is_subscribed: bool,
    /// Avatar as a base64 image data URI, `null` when unset.
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn new(user: &User, is_subscribed: bool) -> Self {
        Self {
            email: user.email().as_ref().to_owned(),
            id: user.id().to_string(),
            username: user.username().as_ref().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            is_subscribed,
            avatar: user.avatar().map(|avatar| avatar.as_str().to_owned()),
        }
    }
}

impl From<&UserProfile> for UserResponse {
    fn from(profile: &UserProfile) -> Self {
        Self::new(&profile.user, profile.is_subscribed)
    }
}

/// Body of `PUT /api/users/me/avatar/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvatarRequest {
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub avatar: String,
}

/// Stored avatar echoed back after an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvatarResponse {
    #[schema(example = "data:image/png;base64,iVBORw0KGgo=")]
    pub avatar: String,
}

/// Ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    #[schema(example = 200)]
    pub amount: u32,
}

/// Short recipe card returned by favorites, cart and subscription endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummaryResponse {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "Soup")]
    pub name: String,
    #[schema(example = "recipes/images/soup.png")]
    pub image: String,
    #[schema(example = 30)]
    pub cooking_time: u32,
}

impl From<&RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            id: summary.id.get(),
            name: summary.name.clone(),
            image: summary.image.clone(),
            cooking_time: summary.cooking_time,
        }
    }
}

/// Full recipe as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: u32,
}

impl From<&RecipeView> for RecipeResponse {
    fn from(view: &RecipeView) -> Self {
        let recipe = &view.recipe;
        Self {
            id: recipe.id.get(),
            tags: recipe.tags.iter().map(TagResponse::from).collect(),
            author: UserResponse::new(&view.author, view.author_subscribed),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|line| RecipeIngredientResponse {
                    id: line.ingredient.id().get(),
                    name: line.ingredient.name().to_owned(),
                    measurement_unit: line.ingredient.measurement_unit().to_owned(),
                    amount: line.amount.get(),
                })
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Followed author with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscribedAuthorResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    #[schema(example = 12)]
    pub recipes_count: u64,
}

impl From<&SubscribedAuthor> for SubscribedAuthorResponse {
    fn from(author: &SubscribedAuthor) -> Self {
        Self {
            // Listing subscriptions only ever returns followed authors.
            user: UserResponse::new(&author.user, true),
            recipes: author.recipes.iter().map(RecipeSummaryResponse::from).collect(),
            recipes_count: author.recipes_count,
        }
    }
}

/// One row of the aggregated shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientTotalResponse {
    pub name: String,
    pub measurement_unit: String,
    pub amount: u64,
}

impl From<&IngredientTotal> for IngredientTotalResponse {
    fn from(total: &IngredientTotal) -> Self {
        Self {
            name: total.ingredient.name().to_owned(),
            measurement_unit: total.ingredient.measurement_unit().to_owned(),
            amount: total.total,
        }
    }
}

macro_rules! paginated {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        pub struct $name {
            /// Total matches across every page.
            pub count: u64,
            /// Following page number, `null` on the last page.
            pub next: Option<u32>,
            /// Preceding page number, `null` on the first page.
            pub previous: Option<u32>,
            pub results: Vec<$item>,
        }

        impl<T> From<Page<T>> for $name
        where
            for<'a> $item: From<&'a T>,
        {
            fn from(page: Page<T>) -> Self {
                Self {
                    count: page.total,
                    next: page.next_page(),
                    previous: page.previous_page(),
                    results: page.items.iter().map(<$item>::from).collect(),
                }
            }
        }
    };
}

paginated!(
    /// Page of recipes.
    RecipeListResponse,
    RecipeResponse
);
paginated!(
    /// Page of followed authors.
    SubscriptionListResponse,
    SubscribedAuthorResponse
);
