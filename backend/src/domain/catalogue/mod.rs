//! Catalogue reference data: tags and ingredients.
//!
//! Both entities are immutable once loaded. Recipes reference them by id and
//! the shopping-list aggregator groups by [`IngredientId`].

mod ingredient;
mod tag;

#[cfg(test)]
mod tests;

pub use ingredient::{Ingredient, IngredientDraft, IngredientId};
pub use tag::{Tag, TagDraft, TagId};

/// Maximum length of tag and ingredient names.
pub const NAME_MAX: usize = 150;
/// Maximum length of a measurement unit label.
pub const UNIT_MAX: usize = 150;

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    #[error("{field} must contain lowercase ASCII letters, digits, hyphens or underscores")]
    InvalidSlug { field: &'static str },
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("expected `name,unit` but found {line:?}")]
    MissingSeparator { line: String },
}

fn validate_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogueValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(CatalogueValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}
