//! Short-link domain service.
//!
//! Generation is idempotent: a recipe that already holds a token keeps it.
//! Otherwise candidates from [`ShortLinkToken::candidates`] are claimed in
//! order until one is free.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ShortLinkCommand, ShortLinkQuery, ShortLinkRepository};
use crate::domain::{Error, MAX_SHORT_LINK_ATTEMPTS, RecipeId, ShortLinkClaim, ShortLinkToken};

/// Short-link service implementing [`ShortLinkCommand`] and [`ShortLinkQuery`].
#[derive(Clone)]
pub struct ShortLinkService<L> {
    links: Arc<L>,
}

impl<L> ShortLinkService<L> {
    #[must_use]
    pub const fn new(links: Arc<L>) -> Self {
        Self { links }
    }
}

#[async_trait]
impl<L> ShortLinkCommand for ShortLinkService<L>
where
    L: ShortLinkRepository,
{
    async fn generate(&self, recipe: RecipeId) -> Result<ShortLinkToken, Error> {
        let subject = self
            .links
            .find_subject(recipe)
            .await?
            .ok_or_else(|| Error::not_found("Recipe not found."))?;
        if let Some(token) = subject.token {
            return Ok(token);
        }

        for candidate in ShortLinkToken::candidates(recipe, &subject.name) {
            match self.links.claim(recipe, &candidate).await? {
                ShortLinkClaim::Claimed => {
                    tracing::info!(recipe_id = %recipe, token = %candidate, "short link assigned");
                    return Ok(candidate);
                }
                ShortLinkClaim::AlreadyAssigned(token) => return Ok(token),
                ShortLinkClaim::Taken => {
                    tracing::debug!(recipe_id = %recipe, token = %candidate, "short link collision");
                }
            }
        }

        tracing::warn!(
            recipe_id = %recipe,
            attempts = MAX_SHORT_LINK_ATTEMPTS,
            "no free short link token"
        );
        Err(Error::internal("Could not allocate a short link."))
    }
}

#[async_trait]
impl<L> ShortLinkQuery for ShortLinkService<L>
where
    L: ShortLinkRepository,
{
    async fn resolve(&self, token: &str) -> Result<RecipeId, Error> {
        let not_found = || Error::not_found("Short link not found.");
        let token = ShortLinkToken::parse(token).map_err(|_| not_found())?;
        self.links.resolve(&token).await?.ok_or_else(not_found)
    }
}
