//! Subscription and user profile domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    RecipeRepository, SubscriptionRepository, SubscriptionsCommand, SubscriptionsQuery,
    UserRepository, UsersQuery,
};
use crate::domain::{Error, Page, PageRequest, SubscribedAuthor, User, UserId, UserProfile};

const USER_NOT_FOUND: &str = "User not found.";

/// Service implementing [`SubscriptionsCommand`], [`SubscriptionsQuery`] and
/// [`UsersQuery`].
#[derive(Clone)]
pub struct SubscriptionService<S, U, R> {
    subscriptions: Arc<S>,
    users: Arc<U>,
    recipes: Arc<R>,
}

impl<S, U, R> SubscriptionService<S, U, R> {
    #[must_use]
    pub const fn new(subscriptions: Arc<S>, users: Arc<U>, recipes: Arc<R>) -> Self {
        Self {
            subscriptions,
            users,
            recipes,
        }
    }
}

impl<S, U, R> SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    async fn user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn with_recipes(
        &self,
        user: User,
        recipes_limit: Option<u32>,
    ) -> Result<SubscribedAuthor, Error> {
        let authored = self.recipes.author_recipes(user.id(), recipes_limit).await?;
        Ok(SubscribedAuthor {
            user,
            recipes: authored.recipes,
            recipes_count: authored.total,
        })
    }
}

#[async_trait]
impl<S, U, R> SubscriptionsCommand for SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    async fn subscribe(
        &self,
        subscriber: &UserId,
        author: &UserId,
        recipes_limit: Option<u32>,
    ) -> Result<SubscribedAuthor, Error> {
        if subscriber == author {
            return Err(Error::invalid_request("You cannot subscribe to yourself."));
        }
        let user = self.user(author).await?;
        self.subscriptions
            .add(subscriber, author)
            .await?
            .require_created("You are already subscribed to this user.")?;
        tracing::info!(subscriber = %subscriber, author = %author, "subscription created");
        self.with_recipes(user, recipes_limit).await
    }

    async fn unsubscribe(&self, subscriber: &UserId, author: &UserId) -> Result<(), Error> {
        self.user(author).await?;
        self.subscriptions
            .remove(subscriber, author)
            .await?
            .require_removed("You are not subscribed to this user.")
    }
}

#[async_trait]
impl<S, U, R> SubscriptionsQuery for SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    async fn list(
        &self,
        subscriber: &UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<SubscribedAuthor>, Error> {
        let Page {
            items,
            total,
            request,
        } = self.subscriptions.list_authors(subscriber, page).await?;
        let mut authors = Vec::with_capacity(items.len());
        for user in items {
            authors.push(self.with_recipes(user, recipes_limit).await?);
        }
        Ok(Page {
            items: authors,
            total,
            request,
        })
    }
}

#[async_trait]
impl<S, U, R> UsersQuery for SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    async fn profile(&self, viewer: Option<UserId>, id: &UserId) -> Result<UserProfile, Error> {
        let user = self.user(id).await?;
        let is_subscribed = match viewer {
            Some(viewer) if &viewer != id => !self
                .subscriptions
                .subscribed_among(&viewer, std::slice::from_ref(id))
                .await?
                .is_empty(),
            _ => false,
        };
        Ok(UserProfile {
            user,
            is_subscribed,
        })
    }
}

#[cfg(test)]
#[path = "subscription_service_tests.rs"]
mod tests;
