//! Driving port for user profile reads.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

/// Domain use-case port for fetching user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Profile of `id` as seen by `viewer`.
    async fn profile(&self, viewer: Option<UserId>, id: &UserId) -> Result<UserProfile, Error>;
}
