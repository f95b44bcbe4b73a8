//! Driving port for replacing and clearing the caller's avatar.

use async_trait::async_trait;

use crate::domain::{Error, ImageData, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarCommand: Send + Sync {
    /// Store `avatar` on `user`, replacing any previous one.
    async fn set_avatar(&self, user: &UserId, avatar: ImageData) -> Result<ImageData, Error>;

    /// Remove the avatar. Fails with `invalid_request` when none is set.
    async fn clear_avatar(&self, user: &UserId) -> Result<(), Error>;
}
