//! Driving port for account mutations.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User, UserId};

#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create an account. A taken username is a conflict.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Overwrite username, email, and password of an existing account.
    async fn update(&self, id: UserId, registration: &Registration) -> Result<User, Error>;

    /// Remove an account together with its notes.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
