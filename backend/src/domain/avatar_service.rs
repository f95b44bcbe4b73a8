//! Avatar updates for the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AvatarCommand, UserRepository};
use crate::domain::{Error, ImageData, UserId};

const AVATAR_NOT_SET: &str = "Avatar not set.";

/// Service implementing [`AvatarCommand`] over a [`UserRepository`].
#[derive(Clone)]
pub struct AvatarService<U> {
    users: Arc<U>,
}

impl<U> AvatarService<U> {
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> AvatarCommand for AvatarService<U>
where
    U: UserRepository,
{
    async fn set_avatar(&self, user: &UserId, avatar: ImageData) -> Result<ImageData, Error> {
        if !self.users.set_avatar(user, Some(avatar.clone())).await? {
            return Err(Error::not_found("User not found."));
        }
        tracing::info!(user_id = %user, "avatar updated");
        Ok(avatar)
    }

    async fn clear_avatar(&self, user: &UserId) -> Result<(), Error> {
        let current = self
            .users
            .find_by_id(user)
            .await?
            .ok_or_else(|| Error::not_found("User not found."))?;
        if current.avatar().is_none() {
            return Err(Error::invalid_request(AVATAR_NOT_SET));
        }
        self.users.set_avatar(user, None).await?;
        tracing::info!(user_id = %user, "avatar removed");
        Ok(())
    }
}
