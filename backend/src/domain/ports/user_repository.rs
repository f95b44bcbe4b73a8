//! Port abstraction for user reads, avatar writes and their errors.
use async_trait::async_trait;

use crate::domain::{Error, ImageData, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Access to users provisioned by the authentication collaborator.
///
/// The avatar is the only field the cookbook writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user in `ids` that exists. Order is unspecified.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Store or clear the avatar. Returns `false` when the user is unknown.
    async fn set_avatar(
        &self,
        id: &UserId,
        avatar: Option<ImageData>,
    ) -> Result<bool, UserPersistenceError>;
}

/// Fixture repository with no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_ids(&self, _ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }

    async fn set_avatar(
        &self,
        _id: &UserId,
        _avatar: Option<ImageData>,
    ) -> Result<bool, UserPersistenceError> {
        Ok(false)
    }
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::Connection { message } => Self::service_unavailable(message),
            UserPersistenceError::Query { message } => Self::internal(message),
        }
    }
}
