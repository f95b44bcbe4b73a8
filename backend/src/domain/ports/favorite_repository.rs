//! Port for the user → recipe favorites registry.

use async_trait::async_trait;

use crate::domain::{Error, MembershipAdd, MembershipRemoval, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
    }
}

/// Favorites storage. `add` and `remove` are single conditional writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, FavoriteRepositoryError>;

    async fn remove(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipRemoval, FavoriteRepositoryError>;

    /// Subset of `recipes` that `user` has favorited.
    async fn favorited_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, FavoriteRepositoryError>;
}

/// Fixture repository that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn add(
        &self,
        _user: &UserId,
        _recipe: RecipeId,
    ) -> Result<MembershipAdd, FavoriteRepositoryError> {
        Ok(MembershipAdd::Created)
    }

    async fn remove(
        &self,
        _user: &UserId,
        _recipe: RecipeId,
    ) -> Result<MembershipRemoval, FavoriteRepositoryError> {
        Ok(MembershipRemoval::NotFound)
    }

    async fn favorited_among(
        &self,
        _user: &UserId,
        _recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, FavoriteRepositoryError> {
        Ok(Vec::new())
    }
}

impl From<FavoriteRepositoryError> for Error {
    fn from(err: FavoriteRepositoryError) -> Self {
        match err {
            FavoriteRepositoryError::Connection { message } => Self::service_unavailable(message),
            FavoriteRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
