//! Read models for user profiles and subscriptions.

use super::{RecipeSummary, User};

/// User as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always `false` for anonymous
    /// viewers and for the viewer's own profile.
    pub is_subscribed: bool,
}

/// Followed author with their newest recipes.
///
/// `recipes` may be truncated by the caller's `recipes_limit`;
/// `recipes_count` always counts every recipe of the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribedAuthor {
    pub user: User,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}
