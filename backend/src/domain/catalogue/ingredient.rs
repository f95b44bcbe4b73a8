//! Ingredient reference entity and the import line format.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CatalogueValidationError, NAME_MAX, UNIT_MAX, validate_text};

/// Database identifier of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(i64);

impl IngredientId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Not-yet-persisted ingredient, as read from an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    name: String,
    measurement_unit: String,
}

impl IngredientDraft {
    /// Validate a name/unit pair.
    pub fn new(name: &str, measurement_unit: &str) -> Result<Self, CatalogueValidationError> {
        Ok(Self {
            name: validate_text(name, "ingredient.name", NAME_MAX)?,
            measurement_unit: validate_text(
                measurement_unit,
                "ingredient.measurement_unit",
                UNIT_MAX,
            )?,
        })
    }

    /// Parse one `name,unit` import line.
    ///
    /// The split happens on the last comma so names may contain commas.
    /// Blank lines yield `Ok(None)`.
    ///
    /// # Examples
    /// ```
    /// use cookbook::domain::IngredientDraft;
    ///
    /// let draft = IngredientDraft::parse_line("salt, coarse , g")?.expect("non-blank");
    /// assert_eq!(draft.name(), "salt, coarse");
    /// assert_eq!(draft.measurement_unit(), "g");
    /// # Ok::<(), cookbook::domain::CatalogueValidationError>(())
    /// ```
    pub fn parse_line(line: &str) -> Result<Option<Self>, CatalogueValidationError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (name, unit) =
            line.rsplit_once(',')
                .ok_or_else(|| CatalogueValidationError::MissingSeparator {
                    line: line.to_owned(),
                })?;
        Self::new(name, unit).map(Some)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn measurement_unit(&self) -> &str {
        self.measurement_unit.as_str()
    }

    /// Attach the identifier assigned by storage.
    #[must_use]
    pub fn into_ingredient(self, id: IngredientId) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            measurement_unit: self.measurement_unit,
        }
    }
}

/// Ingredient with its measurement unit, for example "flour" in "g".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: IngredientId,
    name: String,
    measurement_unit: String,
}

impl Ingredient {
    /// Validate and construct a persisted ingredient.
    pub fn new(
        id: IngredientId,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Self, CatalogueValidationError> {
        IngredientDraft::new(name, measurement_unit).map(|draft| draft.into_ingredient(id))
    }

    #[must_use]
    pub fn id(&self) -> IngredientId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn measurement_unit(&self) -> &str {
        self.measurement_unit.as_str()
    }
}
