//! Database-aware `LoginService` adapter built on `DieselUserRepository`.
//!
//! Credentials follow the fixture contract (`admin`/`password`). The adapter
//! additionally confirms that the fixture user row seeded by the initial
//! migration is present, so a session never points at a missing author.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{FIXTURE_USER_ID, LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, UserId};

use super::diesel_user_repository::DieselUserRepository;

const FIXTURE_USERNAME: &str = "admin";
const FIXTURE_PASSWORD: &str = "password";

/// `LoginService` that authenticates the fixture user against PostgreSQL.
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    #[must_use]
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn fixture_user_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USER_ID)
        .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != FIXTURE_USERNAME || credentials.password() != FIXTURE_PASSWORD
        {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let user_id = fixture_user_id()?;
        if self.users.find_by_id(&user_id).await?.is_none() {
            tracing::error!(user_id = %user_id, "fixture user row is missing");
            return Err(Error::internal("fixture user is not provisioned"));
        }
        Ok(user_id)
    }
}
