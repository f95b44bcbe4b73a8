//! Recipe aggregate: validated drafts for writes, read models for views.
//!
//! A [`RecipeDraft`] is the only way to create or replace a recipe. It holds
//! the write invariants (at least one tag and ingredient, no duplicate
//! ingredients, amounts and cooking time of at least 1, an image). Storage
//! then checks that the referenced tags and ingredients exist.


use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ImageData, Ingredient, IngredientId, Tag, TagId, User, UserId};

/// Maximum recipe name length.
pub const RECIPE_NAME_MAX: usize = 150;
/// Upper bound shared by amounts and cooking time (storage uses `INTEGER`).
pub const QUANTITY_MAX: u32 = i32::MAX.unsigned_abs();

/// Database identifier of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of one ingredient in one recipe, in the ingredient's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u32);

impl Amount {
    /// Accept values in `1..=QUANTITY_MAX`.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        (1..=QUANTITY_MAX).contains(&value).then_some(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Validation failures for recipe payloads.
///
/// Messages are user-facing; [`RecipeValidationError::field`] and
/// [`RecipeValidationError::code`] feed the structured error details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("Recipe name must not be empty.")]
    EmptyName,
    #[error("Recipe name must be at most {max} characters.")]
    NameTooLong { max: usize },
    #[error("Recipe text must not be empty.")]
    EmptyText,
    #[error("Cooking time must be at least 1 minute.")]
    CookingTimeOutOfRange { value: i64 },
    #[error("An image is required.")]
    MissingImage,
    #[error("Image must be a base64 data URI such as data:image/png;base64,....")]
    InvalidImage,
    #[error("At least one tag is required.")]
    NoTags,
    #[error("At least one ingredient is required.")]
    NoIngredients,
    #[error("Ingredient amount must be at least 1.")]
    AmountOutOfRange { index: usize, value: i64 },
    #[error("Duplicate ingredients are not allowed.")]
    DuplicateIngredient { id: IngredientId },
}

impl RecipeValidationError {
    /// Payload field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyText => "text",
            Self::CookingTimeOutOfRange { .. } => "cooking_time",
            Self::MissingImage | Self::InvalidImage => "image",
            Self::NoTags => "tags",
            Self::NoIngredients
            | Self::AmountOutOfRange { .. }
            | Self::DuplicateIngredient { .. } => "ingredients",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::EmptyText | Self::MissingImage => "required",
            Self::NameTooLong { .. } => "too_long",
            Self::CookingTimeOutOfRange { .. } | Self::AmountOutOfRange { .. } => "out_of_range",
            Self::InvalidImage => "invalid_image",
            Self::NoTags | Self::NoIngredients => "empty",
            Self::DuplicateIngredient { .. } => "duplicate",
        }
    }
}

/// One `{id, amount}` pair as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmountInput {
    pub id: i64,
    pub amount: i64,
}

/// Unvalidated recipe payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub image: Option<String>,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmountInput>,
}

/// Validated ingredient line of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient: IngredientId,
    pub amount: Amount,
}

/// Validated recipe content used to create or fully replace a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    text: String,
    cooking_time: u32,
    image: ImageData,
    tags: Vec<TagId>,
    ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    /// Validate a raw payload.
    ///
    /// Duplicate tag ids collapse to one; duplicate ingredient ids are
    /// rejected because their amounts would be ambiguous.
    pub fn new(input: RecipeInput) -> Result<Self, RecipeValidationError> {
        let RecipeInput {
            name,
            text,
            cooking_time,
            image,
            tags,
            ingredients,
        } = input;

        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if name.chars().count() > RECIPE_NAME_MAX {
            return Err(RecipeValidationError::NameTooLong {
                max: RECIPE_NAME_MAX,
            });
        }
        if text.trim().is_empty() {
            return Err(RecipeValidationError::EmptyText);
        }
        let cooking_time = u32::try_from(cooking_time)
            .ok()
            .and_then(Amount::new)
            .ok_or(RecipeValidationError::CookingTimeOutOfRange {
                value: cooking_time,
            })?
            .get();
        let image = ImageData::parse(image.ok_or(RecipeValidationError::MissingImage)?)
            .map_err(|_| RecipeValidationError::InvalidImage)?;

        Ok(Self {
            name,
            text,
            cooking_time,
            image,
            tags: Self::validate_tags(tags)?,
            ingredients: Self::validate_ingredients(&ingredients)?,
        })
    }

    fn validate_tags(tags: Vec<i64>) -> Result<Vec<TagId>, RecipeValidationError> {
        if tags.is_empty() {
            return Err(RecipeValidationError::NoTags);
        }
        let mut seen = HashSet::new();
        Ok(tags
            .into_iter()
            .filter(|id| seen.insert(*id))
            .map(TagId::new)
            .collect())
    }

    fn validate_ingredients(
        lines: &[IngredientAmountInput],
    ) -> Result<Vec<IngredientAmount>, RecipeValidationError> {
        if lines.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }
        let mut seen = HashSet::new();
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let amount = u32::try_from(line.amount)
                    .ok()
                    .and_then(Amount::new)
                    .ok_or(RecipeValidationError::AmountOutOfRange {
                        index,
                        value: line.amount,
                    })?;
                let ingredient = IngredientId::new(line.id);
                if !seen.insert(ingredient) {
                    return Err(RecipeValidationError::DuplicateIngredient { id: ingredient });
                }
                Ok(IngredientAmount { ingredient, amount })
            })
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub const fn cooking_time(&self) -> u32 {
        self.cooking_time
    }

    #[must_use]
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Distinct tag ids in submission order.
    #[must_use]
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    #[must_use]
    pub fn ingredients(&self) -> &[IngredientAmount] {
        &self.ingredients
    }

    /// Ingredient ids referenced by the draft.
    #[must_use]
    pub fn ingredient_ids(&self) -> Vec<IngredientId> {
        self.ingredients.iter().map(|line| line.ingredient).collect()
    }
}

/// Ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: Amount,
}

/// Stored recipe with its tags and ingredient lines resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: UserId,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: u32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Compact form used by favorites, shopping cart and subscriptions.
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

/// Short recipe card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub image: String,
    pub cooking_time: u32,
}

/// Recipe decorated with viewer-relative flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: User,
    pub author_subscribed: bool,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// List filters for recipe queries. Empty fields do not filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeFilter {
    pub author: Option<UserId>,
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub favorited_by: Option<UserId>,
    pub in_cart_of: Option<UserId>,
}

/// Raw list options as a client expresses them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeListOptions {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub only_favorited: bool,
    pub only_in_cart: bool,
}

impl RecipeFilter {
    /// Resolve `options` against `viewer`.
    ///
    /// Returns `None` when the options can only match an empty set, which is
    /// the case for an anonymous viewer asking for favorites or cart items.
    #[must_use]
    pub fn for_viewer(viewer: Option<&UserId>, options: RecipeListOptions) -> Option<Self> {
        let personal = |flag: bool| -> Option<Option<UserId>> {
            match (flag, viewer) {
                (false, _) => Some(None),
                (true, Some(user)) => Some(Some(user.clone())),
                (true, None) => None,
            }
        };
        Some(Self {
            favorited_by: personal(options.only_favorited)?,
            in_cart_of: personal(options.only_in_cart)?,
            author: options.author,
            tags: options.tags,
        })
    }
}
