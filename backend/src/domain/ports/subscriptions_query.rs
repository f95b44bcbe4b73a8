//! Driving port for listing followed authors.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, SubscribedAuthor, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    /// Page of authors `subscriber` follows, each with up to
    /// `recipes_limit` of their newest recipes.
    async fn list(
        &self,
        subscriber: &UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<SubscribedAuthor>, Error>;
}
