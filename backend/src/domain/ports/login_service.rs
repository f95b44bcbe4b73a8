//! Driving port for the external authentication collaborator.
//!
//! Inbound adapters call it to turn credentials into a [`UserId`]; the
//! cookbook never stores passwords itself.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Identifier of the development user accepted by [`FixtureLoginService`].
///
/// The initial migration seeds a matching `users` row so the fixture identity
/// can author recipes against a real database.
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator: `admin` / `password` maps to
/// [`FIXTURE_USER_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
