//! Short-link tokens for recipes.
//!
//! A token is the first [`TOKEN_LEN`] lowercase hex characters of a SHA-256
//! digest. The first candidate hashes the recipe id followed by its name; on
//! collision the previous candidate is hashed again. Callers stop after
//! [`MAX_SHORT_LINK_ATTEMPTS`] candidates.

use std::fmt;

use sha2::{Digest, Sha256};

/// Number of hex characters in a token.
pub const TOKEN_LEN: usize = 6;
/// Upper bound on candidates tried before giving up.
pub const MAX_SHORT_LINK_ATTEMPTS: usize = 16;

/// Rejected token input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("short link token must be 6 lowercase hex characters")]
pub struct ShortLinkTokenError;

/// Validated short-link token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortLinkToken(String);

impl ShortLinkToken {
    /// Parse a token taken from a URL path.
    pub fn parse(value: &str) -> Result<Self, ShortLinkTokenError> {
        let well_formed = value.len() == TOKEN_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(value.to_owned()))
        } else {
            Err(ShortLinkTokenError)
        }
    }

    /// First candidate for a recipe.
    ///
    /// # Examples
    /// ```
    /// use cookbook::domain::{RecipeId, ShortLinkToken};
    ///
    /// let first = ShortLinkToken::candidate(RecipeId::new(42), "Soup");
    /// assert_eq!(first, ShortLinkToken::candidate(RecipeId::new(42), "Soup"));
    /// assert_eq!(first.as_str().len(), 6);
    /// ```
    #[must_use]
    pub fn candidate(recipe: super::RecipeId, name: &str) -> Self {
        Self::digest(&format!("{recipe}{name}"))
    }

    /// Next candidate after `self` collided with another recipe's token.
    #[must_use]
    pub fn rehash(&self) -> Self {
        Self::digest(&self.0)
    }

    /// Candidate sequence for a recipe, bounded by [`MAX_SHORT_LINK_ATTEMPTS`].
    pub fn candidates(recipe: super::RecipeId, name: &str) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(Self::candidate(recipe, name)), |prev| {
            Some(prev.rehash())
        })
        .take(MAX_SHORT_LINK_ATTEMPTS)
    }

    fn digest(input: &str) -> Self {
        let hash = hex::encode(Sha256::digest(input.as_bytes()));
        Self(hash.chars().take(TOKEN_LEN).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShortLinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of trying to store a candidate token on a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortLinkClaim {
    /// The candidate is now the recipe's token.
    Claimed,
    /// Another recipe already holds the candidate.
    Taken,
    /// The recipe gained a token concurrently; use it.
    AlreadyAssigned(ShortLinkToken),
}
