//! PostgreSQL-backed `SubscriptionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{MembershipAdd, MembershipRemoval, Page, PageRequest, User, UserId};

use super::diesel_helpers::{
    collect_rows, count_to_u64, is_connection_error, map_diesel_error_message,
    map_pool_error_message,
};
use super::models::{NewSubscriptionRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{subscriptions, users};

/// Diesel-backed subscription registry.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    SubscriptionRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    if is_connection_error(&error) {
        SubscriptionRepositoryError::connection(map_diesel_error_message(error, "subscription"))
    } else {
        SubscriptionRepositoryError::query(map_diesel_error_message(error, "subscription"))
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn add(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipAdd, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(subscriptions::table)
            .values(&NewSubscriptionRow {
                user_id: *subscriber.as_uuid(),
                author_id: *author.as_uuid(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(if inserted > 0 {
            MembershipAdd::Created
        } else {
            MembershipAdd::AlreadyExists
        })
    }

    async fn remove(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipRemoval, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            subscriptions::table
                .filter(subscriptions::user_id.eq(*subscriber.as_uuid()))
                .filter(subscriptions::author_id.eq(*author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(if deleted > 0 {
            MembershipRemoval::Removed
        } else {
            MembershipRemoval::NotFound
        })
    }

    async fn subscribed_among(
        &self,
        subscriber: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = authors.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Vec<Uuid> = subscriptions::table
            .filter(subscriptions::user_id.eq(*subscriber.as_uuid()))
            .filter(subscriptions::author_id.eq_any(ids))
            .select(subscriptions::author_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(found.into_iter().map(UserId::from_uuid).collect())
    }

    async fn list_authors(
        &self,
        subscriber: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, SubscriptionRepositoryError> {
        let offset = i64::try_from(page.offset()).map_err(|_| {
            SubscriptionRepositoryError::query(format!("page offset {} too large", page.offset()))
        })?;
        let subscriber_id = *subscriber.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = subscriptions::table
            .filter(subscriptions::user_id.eq(subscriber_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let followed = subscriptions::table
            .filter(subscriptions::user_id.eq(subscriber_id))
            .select(subscriptions::author_id);
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(followed))
            .select(UserRow::as_select())
            .order_by((users::username, users::id))
            .limit(i64::from(page.limit()))
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page {
            items: collect_rows(
                rows.into_iter().map(User::try_from),
                SubscriptionRepositoryError::query,
            )?,
            total: count_to_u64(total),
            request: page,
        })
    }
}
