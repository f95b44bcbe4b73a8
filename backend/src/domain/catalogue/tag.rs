//! Tag reference entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CatalogueValidationError, NAME_MAX, validate_text};
use crate::domain::slug::is_valid_slug;

/// Database identifier of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input payload for [`Tag::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

/// Recipe label such as "breakfast".
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `slug` satisfies the slug predicate and is unique in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    name: String,
    slug: String,
}

impl Tag {
    /// Validate and construct a tag.
    pub fn new(draft: TagDraft) -> Result<Self, CatalogueValidationError> {
        let name = validate_text(&draft.name, "tag.name", NAME_MAX)?;
        if !is_valid_slug(&draft.slug) {
            return Err(CatalogueValidationError::InvalidSlug { field: "tag.slug" });
        }
        Ok(Self {
            id: draft.id,
            name,
            slug: draft.slug,
        })
    }

    #[must_use]
    pub fn id(&self) -> TagId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}
