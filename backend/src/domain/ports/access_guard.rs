//! Driving port resolving a presented bearer token to its account.

use async_trait::async_trait;

use crate::domain::{Error, User};

#[async_trait]
pub trait AccessGuard: Send + Sync {
    /// Validate `token` and load the account named by its subject.
    ///
    /// Any failure is reported as [`crate::domain::ErrorCode::Unauthorized`].
    async fn resolve(&self, token: &str) -> Result<User, Error>;
}
