//! Driving port for following and unfollowing authors.

use async_trait::async_trait;

use crate::domain::{Error, SubscribedAuthor, UserId};

/// Domain use-case port for the subscription registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsCommand: Send + Sync {
    /// Follow `author`. Rejects self-subscription and duplicates.
    async fn subscribe(
        &self,
        subscriber: &UserId,
        author: &UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscribedAuthor, Error>;

    async fn unsubscribe(&self, subscriber: &UserId, author: &UserId) -> Result<(), Error>;
}
