//! Port for per-user shopping lists.
//!
//! A list row is created explicitly through [`ShoppingListRepository::ensure_list`]
//! before the first write; reads treat a missing list as empty.

use async_trait::async_trait;

use crate::domain::{CartLine, Error, MembershipAdd, MembershipRemoval, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by shopping list adapters.
    pub enum ShoppingListRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "shopping list connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "shopping list query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Create the user's list if it does not exist yet. Idempotent.
    async fn ensure_list(&self, user: &UserId) -> Result<(), ShoppingListRepositoryError>;

    /// Add `recipe` to the user's existing list.
    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, ShoppingListRepositoryError>;

    async fn remove(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipRemoval, ShoppingListRepositoryError>;

    /// Subset of `recipes` currently in the user's list.
    async fn in_cart_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, ShoppingListRepositoryError>;

    /// Every ingredient line of every recipe in the user's list.
    async fn lines(&self, user: &UserId) -> Result<Vec<CartLine>, ShoppingListRepositoryError>;
}

/// Fixture repository with permanently empty lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShoppingListRepository;

#[async_trait]
impl ShoppingListRepository for FixtureShoppingListRepository {
    async fn ensure_list(&self, _user: &UserId) -> Result<(), ShoppingListRepositoryError> {
        Ok(())
    }

    async fn add(
        &self,
        _user: &UserId,
        _recipe: RecipeId,
    ) -> Result<MembershipAdd, ShoppingListRepositoryError> {
        Ok(MembershipAdd::Created)
    }

    async fn remove(
        &self,
        _user: &UserId,
        _recipe: RecipeId,
    ) -> Result<MembershipRemoval, ShoppingListRepositoryError> {
        Ok(MembershipRemoval::NotFound)
    }

    async fn in_cart_among(
        &self,
        _user: &UserId,
        _recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, ShoppingListRepositoryError> {
        Ok(Vec::new())
    }

    async fn lines(&self, _user: &UserId) -> Result<Vec<CartLine>, ShoppingListRepositoryError> {
        Ok(Vec::new())
    }
}

impl From<ShoppingListRepositoryError> for Error {
    fn from(err: ShoppingListRepositoryError) -> Self {
        match err {
            ShoppingListRepositoryError::Connection { message } => {
                Self::service_unavailable(message)
            }
            ShoppingListRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
