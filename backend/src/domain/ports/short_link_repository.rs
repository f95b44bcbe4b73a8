//! Port for storing and resolving recipe short-link tokens.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, ShortLinkClaim, ShortLinkToken};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by short-link adapters.
    pub enum ShortLinkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "short link repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "short link repository query failed: {message}",
    }
}

/// Recipe fields the token generator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkSubject {
    pub name: String,
    pub token: Option<ShortLinkToken>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    async fn find_subject(
        &self,
        recipe: RecipeId,
    ) -> Result<Option<ShortLinkSubject>, ShortLinkRepositoryError>;

    /// Store `token` on `recipe` only if the recipe has none yet and no other
    /// recipe holds `token`.
    async fn claim(
        &self,
        recipe: RecipeId,
        token: &ShortLinkToken,
    ) -> Result<ShortLinkClaim, ShortLinkRepositoryError>;

    /// Exact token lookup.
    async fn resolve(
        &self,
        token: &ShortLinkToken,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError>;
}

/// Fixture repository where no recipe exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShortLinkRepository;

#[async_trait]
impl ShortLinkRepository for FixtureShortLinkRepository {
    async fn find_subject(
        &self,
        _recipe: RecipeId,
    ) -> Result<Option<ShortLinkSubject>, ShortLinkRepositoryError> {
        Ok(None)
    }

    async fn claim(
        &self,
        _recipe: RecipeId,
        _token: &ShortLinkToken,
    ) -> Result<ShortLinkClaim, ShortLinkRepositoryError> {
        Ok(ShortLinkClaim::Taken)
    }

    async fn resolve(
        &self,
        _token: &ShortLinkToken,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError> {
        Ok(None)
    }
}

impl From<ShortLinkRepositoryError> for Error {
    fn from(err: ShortLinkRepositoryError) -> Self {
        match err {
            ShortLinkRepositoryError::Connection { message } => Self::service_unavailable(message),
            ShortLinkRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
