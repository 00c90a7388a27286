//! Authentication flow and authorization guard.
//!
//! [`AuthService`] exchanges credentials for bearer tokens and resolves
//! presented tokens back to accounts. Both failure paths return fixed
//! messages so callers learn nothing about which check failed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::error_mapping::{
    map_hash_error, map_token_issue_error, map_user_persistence_error,
};
use crate::domain::ports::{
    AccessGuard, CredentialHasher, LoginService, TokenService, UserRepository,
};
use crate::domain::{AccessToken, Error, LoginCredentials, TokenClaims, User, Username};

/// Message returned for every failed login.
pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";
/// Message returned for every rejected bearer token.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Service implementing [`LoginService`] and [`AccessGuard`].
#[derive(Clone)]
pub struct AuthService<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<R, H, T> AuthService<R, H, T> {
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

fn rejected_token() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl<R, H, T> LoginService for AuthService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher,
    T: TokenService,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        // A name that could never have been registered cannot match.
        let Ok(username) = Username::new(credentials.username()) else {
            return Ok(None);
        };
        let Some(user) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login rejected: unknown account");
            return Ok(None);
        };
        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !verified {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Ok(None);
        }
        Ok(Some(user))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let user = self
            .authenticate(credentials)
            .await?
            .ok_or_else(|| Error::authentication_failed(INCORRECT_CREDENTIALS_MESSAGE))?;
        let claims = TokenClaims::expiring_in(
            user.username().as_str(),
            self.tokens.default_ttl(),
            self.clock.utc(),
        );
        let token = self.tokens.issue(&claims).map_err(map_token_issue_error)?;
        debug!(user_id = %user.id(), expires_at = %claims.expires_at(), "issued access token");
        Ok(token)
    }
}

#[async_trait]
impl<R, H, T> AccessGuard for AuthService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher,
    T: TokenService,
{
    async fn resolve(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.validate(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            rejected_token()
        })?;
        let username = Username::new(claims.subject()).map_err(|_| {
            debug!("bearer token subject is not a valid username");
            rejected_token()
        })?;
        self.users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                debug!("bearer token subject has no account");
                rejected_token()
            })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
