//! Driving port for resolving short links.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkQuery: Send + Sync {
    /// Recipe behind `token`; malformed and unknown tokens are `not_found`.
    async fn resolve(&self, token: &str) -> Result<RecipeId, Error>;
}
