//! Driving port for issuing recipe short links.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, ShortLinkToken};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkCommand: Send + Sync {
    /// Token for `recipe`, generated and stored on first use and returned
    /// unchanged afterwards.
    async fn generate(&self, recipe: RecipeId) -> Result<ShortLinkToken, Error>;
}
