//! Driving port for the token endpoint.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing how accounts are stored or passwords hashed.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Look the account up and verify the password.
    ///
    /// An unknown username and a wrong password both yield `Ok(None)`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error>;

    /// Authenticate and issue a bearer token for the account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}
