//! Port for the user → user subscription registry.

use async_trait::async_trait;

use crate::domain::{Error, MembershipAdd, MembershipRemoval, Page, PageRequest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by subscription adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "subscription repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "subscription repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Record that `subscriber` follows `author`.
    async fn add(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipAdd, SubscriptionRepositoryError>;

    async fn remove(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipRemoval, SubscriptionRepositoryError>;

    /// Subset of `authors` that `subscriber` follows.
    async fn subscribed_among(
        &self,
        subscriber: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError>;

    /// Page of followed authors ordered by username.
    async fn list_authors(
        &self,
        subscriber: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, SubscriptionRepositoryError>;
}

/// Fixture repository without subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn add(
        &self,
        _subscriber: &UserId,
        _author: &UserId,
    ) -> Result<MembershipAdd, SubscriptionRepositoryError> {
        Ok(MembershipAdd::Created)
    }

    async fn remove(
        &self,
        _subscriber: &UserId,
        _author: &UserId,
    ) -> Result<MembershipRemoval, SubscriptionRepositoryError> {
        Ok(MembershipRemoval::NotFound)
    }

    async fn subscribed_among(
        &self,
        _subscriber: &UserId,
        _authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_authors(
        &self,
        _subscriber: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, SubscriptionRepositoryError> {
        Ok(Page::empty(page))
    }
}

impl From<SubscriptionRepositoryError> for Error {
    fn from(err: SubscriptionRepositoryError) -> Self {
        match err {
            SubscriptionRepositoryError::Connection { message } => {
                Self::service_unavailable(message)
            }
            SubscriptionRepositoryError::Query { message } => Self::internal(message),
        }
    }
}
